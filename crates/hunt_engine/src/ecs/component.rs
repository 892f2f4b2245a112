//! Component trait

/// Marker trait for components
///
/// Components are plain values; the storage owns them. Implement this for any
/// `'static` data type that should be attachable to an [`Entity`](super::Entity).
pub trait Component: 'static + Send + Sync {
    /// Human readable name used in errors and logs
    fn type_name() -> &'static str
    where
        Self: Sized,
    {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}
