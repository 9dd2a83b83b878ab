pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! Sizes and timings shared by the dashboard, organized by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Buffer size of the channel carrying responses back to the UI loop.
    pub const UPDATE_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // UI LOOP
    // =============================================================================

    /// How long the UI loop waits for terminal input before redrawing (milliseconds).
    pub const INPUT_POLL_MS: u64 = 100;

    // =============================================================================
    // NOTIFICATIONS
    // =============================================================================

    /// Toast timing, matching the page script this dashboard replaces.
    pub mod toast {
        use std::time::Duration;

        /// Delay before a new toast starts sliding in (milliseconds).
        pub const SLIDE_IN_DELAY_MS: u64 = 100;

        /// Duration of the slide-in transition (milliseconds).
        pub const SLIDE_IN_MS: u64 = 500;

        /// Time from creation until the toast starts sliding out (milliseconds).
        pub const VISIBLE_MS: u64 = 5_000;

        /// Duration of the slide-out before the toast is removed (milliseconds).
        pub const SLIDE_OUT_MS: u64 = 500;

        /// Toasts drawn at once; older ones wait in the stack until they expire.
        pub const MAX_VISIBLE: usize = 4;

        pub const fn slide_in_delay() -> Duration {
            Duration::from_millis(SLIDE_IN_DELAY_MS)
        }

        pub const fn slide_in() -> Duration {
            Duration::from_millis(SLIDE_IN_MS)
        }

        pub const fn visible() -> Duration {
            Duration::from_millis(VISIBLE_MS)
        }

        pub const fn slide_out() -> Duration {
            Duration::from_millis(SLIDE_OUT_MS)
        }
    }

    // =============================================================================
    // MESSAGES
    // =============================================================================

    /// User-facing texts.
    pub mod messages {
        pub const ASSIGN_SUCCESS: &str = "Тема успешно назначена!";
        pub const ASSIGN_FAILED_PREFIX: &str = "Ошибка при назначении темы: ";
        /// Fixed failure reason; server detail goes to the activity log only.
        pub const ASSIGN_FAILED_REASON: &str = "Ошибка назначения темы";
        pub const STUDENT_PLACEHOLDER: &str = "-- Выберите студента --";
        pub const SUPERVISOR_PLACEHOLDER: &str = "-- Выберите руководителя --";
    }
}
