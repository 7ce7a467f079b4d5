// Constants for the interpreter

use std::time::Duration;

/// Default number of tape cells
pub const DEFAULT_CELL_COUNT: usize = 4096;

/// Fastest throttled speed; also the step used when halving is not exact
pub const MIN_DELAY: Duration = Duration::from_micros(10);

/// Slowest throttled speed
pub const MAX_DELAY: Duration = Duration::from_micros(500_000);

/// Delays must be a multiple of this
pub const DELAY_INCREMENT: Duration = MIN_DELAY;

/// Delay used by the interactive engine unless told otherwise
pub const DEFAULT_DELAY: Duration = MIN_DELAY;

/// Bytes of output retained for the interactive output pane
pub const OUTPUT_CAPACITY: usize = 0x2000;

/// Shortest sleep while paused, so a zero delay never spins the CPU
pub const IDLE_POLL: Duration = Duration::from_millis(1);

/// Interval between IPS samples
pub const IPS_WINDOW: Duration = Duration::from_secs(1);
