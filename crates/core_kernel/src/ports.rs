//! Ports
//!
//! The workflow domain talks to its collaborators (the notification sink,
//! the delay source, the canned result table) through port traits. Each
//! domain defines its own port traits and extends the marker here so every
//! adapter can be shared behind an `Arc` across the runner's driver task.
//!
//! ```rust,ignore
//! #[async_trait]
//! pub trait Sleeper: DomainPort {
//!     async fn sleep(&self, duration: Duration);
//! }
//! ```

/// Marker trait for all domain ports
///
/// Ports are held as `Arc<dyn Port>` and used from spawned tasks, so they
/// must be thread-safe and own their data.
pub trait DomainPort: Send + Sync + 'static {}
