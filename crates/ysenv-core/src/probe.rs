//! Container home directory discovery

use std::process::Command;

/// Determines the home directory inside a container image.
///
/// Implementations return an empty string when the home cannot be
/// determined; that is not an error at this layer.
pub trait ContainerHomeProbe {
    fn probe_home(&self, image: &str, user: Option<&str>) -> String;
}

impl<F> ContainerHomeProbe for F
where
    F: Fn(&str, Option<&str>) -> String,
{
    fn probe_home(&self, image: &str, user: Option<&str>) -> String {
        self(image, user)
    }
}

/// Probes by running `docker run --rm [--user U] IMAGE sh -c 'echo $HOME'`.
///
/// Blocks until the container exits; `--rm` teardown alone can take several
/// seconds. There is no timeout.
#[derive(Debug, Clone)]
pub struct DockerHomeProbe {
    program: String,
}

impl Default for DockerHomeProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl DockerHomeProbe {
    pub fn new() -> Self {
        Self::with_program("docker")
    }

    /// Use another docker-compatible binary.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments passed after the program name.
    pub fn args(image: &str, user: Option<&str>) -> Vec<String> {
        let mut args = vec!["run".to_string(), "--rm".to_string()];
        if let Some(user) = user {
            args.push("--user".to_string());
            args.push(user.to_string());
        }
        args.push(image.to_string());
        args.push("sh".to_string());
        args.push("-c".to_string());
        args.push("echo $HOME".to_string());
        args
    }
}

impl ContainerHomeProbe for DockerHomeProbe {
    fn probe_home(&self, image: &str, user: Option<&str>) -> String {
        let args = Self::args(image, user);
        tracing::debug!(program = %self.program, ?args, "Probing container home");

        let output = match Command::new(&self.program).args(&args).output() {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(
                    program = %self.program,
                    error = %e,
                    "Container probe failed to start"
                );
                return String::new();
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(
                image,
                code = ?output.status.code(),
                stderr = %stderr.trim(),
                "Container probe exited unsuccessfully"
            );
            return String::new();
        }

        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}
