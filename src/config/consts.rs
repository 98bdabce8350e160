/// Default initial capacity of a tree's pending-action queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;
/// Largest accepted initial queue capacity - guards against typos allocating gigabytes
pub const MAX_QUEUE_CAPACITY: usize = 1 << 20;
/// Default `tracing_subscriber::EnvFilter` directive for hosts
pub const DEFAULT_LOG_FILTER: &str = "info";
