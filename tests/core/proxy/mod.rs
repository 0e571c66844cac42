pub mod address_tests;
