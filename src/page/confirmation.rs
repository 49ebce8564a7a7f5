/// Asks the user to approve a destructive action before it is sent.
pub trait Confirmation: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirmation for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Approves everything; used for `--yes` style invocations.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirmation for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

pub fn delete_prompt(login: &str) -> String {
    format!("Are you sure you want to delete the user: {}?", login)
}
