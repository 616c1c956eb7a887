//! Layout constants — grid size, entry point, generation odds.
//!
//! Plain constants with no runtime dependency. Both the session layer and the
//! headless simtest read these.

pub mod grid {
    /// Rows per floor (labeled `A`..`H`).
    pub const ROWS: i32 = 8;
    /// Columns per floor.
    pub const COLS: i32 = 5;
    /// Spots generated for one floor.
    pub const SPOTS_PER_FLOOR: usize = (ROWS * COLS) as usize;
}

pub mod entry {
    /// Entry point row. Distance and routing are measured from here.
    pub const ROW: i32 = 0;
    /// Entry point column.
    pub const COL: i32 = 2;
}

pub mod odds {
    /// Chance that a spot is forced to available after the fair status draw.
    pub const AVAILABLE_OVERRIDE: f64 = 0.7;
    /// Expected share of available spots: 0.7 + 0.3 * 0.5.
    pub const EXPECTED_AVAILABLE: f64 = 0.85;
}

pub mod booking {
    /// Shortest pre-booking, in hours.
    pub const MIN_DURATION_HOURS: u8 = 1;
    /// Longest pre-booking unless the config overrides it.
    pub const MAX_DURATION_HOURS: u8 = 12;
    /// Display format for clock times ("02:30 PM").
    pub const TIME_FORMAT: &str = "%I:%M %p";
    /// Display format for dates ("17 Oct 2026").
    pub const DATE_FORMAT: &str = "%d %b %Y";
}
