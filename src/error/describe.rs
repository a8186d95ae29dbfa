use thiserror::Error;

/// Failures at the test-runner boundary. None of these abort a run; the
/// pipeline logs them and continues with an empty test set.
#[derive(Error, Debug)]
pub enum DescribeError {
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("failed while waiting for '{program}': {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}: {stderr}")]
    NonZeroExit {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("'{program}' produced no output")]
    EmptyOutput { program: String },

    #[error("'{program}' did not finish within {secs}s")]
    Timeout { program: String, secs: u64 },

    #[error("describe output is not a JSON test list: {source}")]
    Malformed { source: serde_json::Error },
}

impl DescribeError {
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    pub fn non_zero_exit(
        program: impl Into<String>,
        code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        let status = match code {
            Some(code) => format!("exit code {code}"),
            None => "a signal".to_string(),
        };
        Self::NonZeroExit {
            program: program.into(),
            status,
            stderr: stderr.into(),
        }
    }

    pub fn empty_output(program: impl Into<String>) -> Self {
        Self::EmptyOutput {
            program: program.into(),
        }
    }

    pub fn timeout(program: impl Into<String>, secs: u64) -> Self {
        Self::Timeout {
            program: program.into(),
            secs,
        }
    }
}
