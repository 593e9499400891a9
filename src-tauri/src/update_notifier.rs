use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use crate::{update_channel::UpdateChannel, RESTART_AFTER_DOWNLOAD_DELAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TargetPlatform {
    Windows,
    MacOs,
    Other,
}

impl TargetPlatform {
    pub(crate) fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UpdateDialog {
    pub(crate) title: String,
    pub(crate) message: String,
    pub(crate) detail: String,
}

impl UpdateDialog {
    /// Native message boxes have no separate detail line, so the detail is
    /// appended below the message.
    pub(crate) fn body_text(&self) -> String {
        if self.message.trim().is_empty() {
            return self.detail.clone();
        }
        format!("{}\n\n{}", self.message, self.detail)
    }
}

pub(crate) fn update_available_dialog(
    channel: UpdateChannel,
    platform: TargetPlatform,
    release_notes: Option<&str>,
    release_name: &str,
) -> UpdateDialog {
    let message = match platform {
        TargetPlatform::Windows => release_notes.unwrap_or_default().to_string(),
        TargetPlatform::MacOs | TargetPlatform::Other => release_name.to_string(),
    };

    UpdateDialog {
        title: format!("{channel} Update Available"),
        message,
        detail: format!("A new {channel} version download started."),
    }
}

pub(crate) fn update_not_available_dialog(channel: UpdateChannel) -> UpdateDialog {
    UpdateDialog {
        title: format!("Update Not Available for {channel}"),
        message: format!("You are running the latest {channel} release."),
        detail: format!("No newer {channel} release is published on the update feed."),
    }
}

fn claim_once(flag: &AtomicBool) -> bool {
    flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_ok()
}

/// One-shot bookkeeping for the three terminal update outcomes. Each outcome
/// is acted on the first time it is observed and ignored for the rest of the
/// process lifetime; the flags are never reset.
#[derive(Debug, Default)]
pub(crate) struct UpdateNotifier {
    available_shown: AtomicBool,
    not_available_shown: AtomicBool,
    downloaded_handled: AtomicBool,
}

impl UpdateNotifier {
    pub(crate) fn on_update_available(
        &self,
        channel: UpdateChannel,
        platform: TargetPlatform,
        release_notes: Option<&str>,
        release_name: &str,
    ) -> Option<UpdateDialog> {
        claim_once(&self.available_shown).then(|| {
            update_available_dialog(channel, platform, release_notes, release_name)
        })
    }

    pub(crate) fn on_update_not_available(&self, channel: UpdateChannel) -> Option<UpdateDialog> {
        claim_once(&self.not_available_shown).then(|| update_not_available_dialog(channel))
    }

    /// Returns the delay before install-and-restart for the first download only.
    pub(crate) fn on_update_downloaded(&self) -> Option<Duration> {
        claim_once(&self.downloaded_handled).then_some(RESTART_AFTER_DOWNLOAD_DELAY)
    }

    pub(crate) fn available_shown(&self) -> bool {
        self.available_shown.load(Ordering::Acquire)
    }

    pub(crate) fn not_available_shown(&self) -> bool {
        self.not_available_shown.load(Ordering::Acquire)
    }

    pub(crate) fn downloaded_handled(&self) -> bool {
        self.downloaded_handled.load(Ordering::Acquire)
    }
}
