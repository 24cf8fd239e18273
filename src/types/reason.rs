//! Reason codes for phase changes and commands

use serde::{Deserialize, Serialize};

/// Why the mouth is where it is after a tick or command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R001: Idle
    // =========================================================================
    /// Machine created, frame not set yet
    R001_UNINITIALIZED,
    /// No frames loaded, nothing to do
    R001_NO_FRAMES,
    /// Mouth held open
    R001_IDLE_OPEN,

    // =========================================================================
    // R002: Alert zone
    // =========================================================================
    /// Finger entered the alert zone, closing starts
    R002_ALERT_CLOSING_STARTED,
    /// Closing sweep in progress
    R002_ALERT_CLOSING,
    /// Closing sweep finished, mouth held shut
    R002_ALERT_CLOSED_HOLD,
    /// Finger left the alert zone, opening starts
    R002_ALERT_OPENING_STARTED,
    /// Opening sweep in progress
    R002_ALERT_OPENING,
    /// Opening sweep finished, back to idle
    R002_ALERT_OPENED,
    /// Finger came back while opening, closing resumes from current frame
    R002_ALERT_CLOSING_RESUMED,

    // =========================================================================
    // R003: Finger inside the mouth
    // =========================================================================
    /// Finger entered the mouth zone
    R003_FINGER_ENTERED,
    /// Safe window counting down
    R003_COUNTDOWN_RUNNING,
    /// Finger left the mouth zone
    R003_FINGER_EXITED,

    // =========================================================================
    // R004: Bite
    // =========================================================================
    /// Countdown ran out
    R004_BITE_COUNTDOWN_EXPIRED,
    /// Finger entered a mouth that was already shut
    R004_BITE_CLOSED_MOUTH_ENTERED,
    /// Alert close finished with the finger inside
    R004_BITE_ALERT_CLOSED_ON_FINGER,
    /// Finger resting inside a dangerous mouth
    R004_BITE_DANGEROUS_REST,
    /// Bite requested from outside
    R004_BITE_FORCED,
    /// Bite animation playing
    R004_BITE_CHOMPING,
    /// Bite animation done, mouth shut for good
    R004_BITE_COMPLETE,

    // =========================================================================
    // R005: Collection
    // =========================================================================
    /// Ring pulled out in time
    R005_RING_COLLECTED,
    /// Ring grabbed while the mouth was not safe
    R005_COLLECT_REJECTED,

    // =========================================================================
    // R006: Ignored requests
    // =========================================================================
    /// Request arrived after the round was resolved
    R006_IGNORED_RESOLVED,
    /// Request repeated an edge that already happened
    R006_IGNORED_REDUNDANT,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R001_UNINITIALIZED => "R001_UNINITIALIZED",
            Self::R001_NO_FRAMES => "R001_NO_FRAMES",
            Self::R001_IDLE_OPEN => "R001_IDLE_OPEN",
            Self::R002_ALERT_CLOSING_STARTED => "R002_ALERT_CLOSING_STARTED",
            Self::R002_ALERT_CLOSING => "R002_ALERT_CLOSING",
            Self::R002_ALERT_CLOSED_HOLD => "R002_ALERT_CLOSED_HOLD",
            Self::R002_ALERT_OPENING_STARTED => "R002_ALERT_OPENING_STARTED",
            Self::R002_ALERT_OPENING => "R002_ALERT_OPENING",
            Self::R002_ALERT_OPENED => "R002_ALERT_OPENED",
            Self::R002_ALERT_CLOSING_RESUMED => "R002_ALERT_CLOSING_RESUMED",
            Self::R003_FINGER_ENTERED => "R003_FINGER_ENTERED",
            Self::R003_COUNTDOWN_RUNNING => "R003_COUNTDOWN_RUNNING",
            Self::R003_FINGER_EXITED => "R003_FINGER_EXITED",
            Self::R004_BITE_COUNTDOWN_EXPIRED => "R004_BITE_COUNTDOWN_EXPIRED",
            Self::R004_BITE_CLOSED_MOUTH_ENTERED => "R004_BITE_CLOSED_MOUTH_ENTERED",
            Self::R004_BITE_ALERT_CLOSED_ON_FINGER => "R004_BITE_ALERT_CLOSED_ON_FINGER",
            Self::R004_BITE_DANGEROUS_REST => "R004_BITE_DANGEROUS_REST",
            Self::R004_BITE_FORCED => "R004_BITE_FORCED",
            Self::R004_BITE_CHOMPING => "R004_BITE_CHOMPING",
            Self::R004_BITE_COMPLETE => "R004_BITE_COMPLETE",
            Self::R005_RING_COLLECTED => "R005_RING_COLLECTED",
            Self::R005_COLLECT_REJECTED => "R005_COLLECT_REJECTED",
            Self::R006_IGNORED_RESOLVED => "R006_IGNORED_RESOLVED",
            Self::R006_IGNORED_REDUNDANT => "R006_IGNORED_REDUNDANT",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R001_UNINITIALIZED => "Waiting for init",
            Self::R001_NO_FRAMES => "No frames loaded",
            Self::R001_IDLE_OPEN => "Mouth open",
            Self::R002_ALERT_CLOSING_STARTED => "Finger close, mouth starts closing",
            Self::R002_ALERT_CLOSING => "Mouth closing",
            Self::R002_ALERT_CLOSED_HOLD => "Mouth shut, waiting",
            Self::R002_ALERT_OPENING_STARTED => "Finger gone, mouth starts opening",
            Self::R002_ALERT_OPENING => "Mouth opening",
            Self::R002_ALERT_OPENED => "Mouth fully open again",
            Self::R002_ALERT_CLOSING_RESUMED => "Finger back, closing from here",
            Self::R003_FINGER_ENTERED => "Finger in the mouth",
            Self::R003_COUNTDOWN_RUNNING => "Safe window running out",
            Self::R003_FINGER_EXITED => "Finger out of the mouth",
            Self::R004_BITE_COUNTDOWN_EXPIRED => "Too slow - bite",
            Self::R004_BITE_CLOSED_MOUTH_ENTERED => "Finger into a shut mouth - bite",
            Self::R004_BITE_ALERT_CLOSED_ON_FINGER => "Mouth closed on the finger - bite",
            Self::R004_BITE_DANGEROUS_REST => "Finger resting in a dangerous mouth - bite",
            Self::R004_BITE_FORCED => "Bite forced",
            Self::R004_BITE_CHOMPING => "Chomping",
            Self::R004_BITE_COMPLETE => "Bitten",
            Self::R005_RING_COLLECTED => "Ring collected",
            Self::R005_COLLECT_REJECTED => "Grabbed too late - bite",
            Self::R006_IGNORED_RESOLVED => "Round already resolved",
            Self::R006_IGNORED_REDUNDANT => "Nothing to do",
        }
    }

    /// True for the codes that start a bite
    pub fn starts_bite(&self) -> bool {
        matches!(
            self,
            Self::R004_BITE_COUNTDOWN_EXPIRED
                | Self::R004_BITE_CLOSED_MOUTH_ENTERED
                | Self::R004_BITE_ALERT_CLOSED_ON_FINGER
                | Self::R004_BITE_DANGEROUS_REST
                | Self::R004_BITE_FORCED
                | Self::R005_COLLECT_REJECTED
        )
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
