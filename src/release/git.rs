use crate::error::SyncError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Commits an updated asset into version control
pub trait VersionControl {
    /// Stage `rel_path`, commit it with `message`, optionally push
    fn commit_file(&self, rel_path: &Path, message: &str, push: bool) -> Result<(), SyncError>;

    /// Working tree root that `rel_path` arguments are relative to
    fn repo_dir(&self) -> &Path;
}

/// `chore(<component>): update to <tag>`
pub fn commit_message(component: &str, tag: &str) -> String {
    format!("chore({}): update to {}", component, tag)
}

/// Shells out to the `git` binary with `-C <repo_dir>`
pub struct GitCli {
    repo_dir: PathBuf,
    remote: String,
    branch: String,
}

impl GitCli {
    pub fn new(repo_dir: impl Into<PathBuf>, remote: &str, branch: &str) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            remote: remote.to_string(),
            branch: branch.to_string(),
        }
    }

    /// Argument lists for each step, in execution order
    pub fn steps(&self, rel_path: &Path, message: &str, push: bool) -> Vec<(&'static str, Vec<String>)> {
        let mut steps = vec![
            (
                "git add",
                vec!["add".to_string(), rel_path.to_string_lossy().to_string()],
            ),
            (
                "git commit",
                vec!["commit".to_string(), "-m".to_string(), message.to_string()],
            ),
        ];
        if push {
            steps.push((
                "git push",
                vec!["push".to_string(), self.remote.clone(), self.branch.clone()],
            ));
        }
        steps
    }

    fn run(&self, step: &str, args: &[String]) -> Result<(), SyncError> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo_dir)
            .args(args)
            .output()
            .map_err(|e| SyncError::Git {
                step: step.to_string(),
                output: e.to_string(),
            })?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).to_string();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(SyncError::Git {
                step: step.to_string(),
                output: combined.trim().to_string(),
            });
        }
        Ok(())
    }
}

impl VersionControl for GitCli {
    fn commit_file(&self, rel_path: &Path, message: &str, push: bool) -> Result<(), SyncError> {
        for (step, args) in self.steps(rel_path, message, push) {
            self.run(step, &args)?;
        }
        Ok(())
    }

    fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }
}
