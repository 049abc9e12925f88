use anyhow::{bail, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    Checking,
    UpToDate { version: String },
}

pub type UpdateListener = Box<dyn Fn(&UpdateStatus) + Send>;

/// Host capability for application updates, injected at startup so the
/// caller never has to guess which shell it runs in.
pub trait UpdateChannel {
    fn check_for_updates(&mut self) -> UpdateStatus;
    fn restart_app(&mut self) -> Result<()>;
    fn subscribe(&mut self, listener: UpdateListener);
}

/// For hosts without an updater: always reports the running version.
pub struct StaticUpdateChannel {
    version: String,
    listeners: Vec<UpdateListener>,
}

impl StaticUpdateChannel {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            listeners: Vec::new(),
        }
    }

    fn publish(&self, status: &UpdateStatus) {
        for listener in &self.listeners {
            listener(status);
        }
    }
}

impl UpdateChannel for StaticUpdateChannel {
    fn check_for_updates(&mut self) -> UpdateStatus {
        self.publish(&UpdateStatus::Checking);
        let status = UpdateStatus::UpToDate {
            version: self.version.clone(),
        };
        self.publish(&status);
        status
    }

    fn restart_app(&mut self) -> Result<()> {
        bail!("no update has been downloaded for version {}", self.version)
    }

    fn subscribe(&mut self, listener: UpdateListener) {
        self.listeners.push(listener);
    }
}
