// src/wgpu_utils/error_scope.rs
//! Runs device calls inside a validation error scope so that invalid
//! descriptors come back as values instead of reaching the device's
//! uncaptured-error handler, which panics by default.

/// Calls `create` with a validation scope pushed and returns its result, or
/// the first validation error raised while it ran.
pub async fn capture_validation<T>(
    device: &wgpu::Device,
    create: impl FnOnce(&wgpu::Device) -> T,
) -> Result<T, wgpu::Error> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let created = create(device);

    match device.pop_error_scope().await {
        Some(error) => Err(error),
        None => Ok(created),
    }
}
