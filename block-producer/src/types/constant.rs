/// Storage key of the forward cursor record
pub const FORWARD_CURSOR_KEY: &str = "CURRENT_SCRAPING_BLOCK";

/// Storage key of the backward cursor record
pub const BACKWARD_CURSOR_KEY: &str = "CURRENT_SCRAPING_BLOCK_DOWN";

/// Default collection holding cursor records
pub const CURSORS_COLLECTION: &str = "block_cursors";

/// Message attribute carrying the producer version on every queued item
pub const PRODUCER_VERSION_ATTRIBUTE: &str = "ProducerVersion";

/// Version of the producer
pub const PRODUCER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound of dispatches per pass used when none is configured
pub const DEFAULT_MAX_BATCH: u64 = 100;

/// Interval between two scan passes used when none is configured
pub const DEFAULT_TRIGGER_INTERVAL_SECS: u64 = 10;
