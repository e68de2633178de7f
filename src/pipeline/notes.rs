//! Release notes rendering
//!
//! The notes carry the release date and the artifact's SHA-256 digest so
//! consumers can verify the downloaded asset. The digest travels in the
//! notes; the release has exactly one uploaded asset.

use crate::core::descriptor::ReleaseDescriptor;
use chrono::Utc;

/// Render the release notes body
pub fn render(descriptor: &ReleaseDescriptor, digest: &str) -> String {
  render_at(descriptor, digest, &Utc::now().format("%Y-%m-%d").to_string())
}

fn render_at(descriptor: &ReleaseDescriptor, digest: &str, date: &str) -> String {
  format!(
    "{name} {tag}\n\nReleased: {date}\n\n| Asset | SHA-256 |\n|---|---|\n| `{asset}` | `{digest}` |\n",
    name = descriptor.name,
    tag = descriptor.tag,
    date = date,
    asset = descriptor.artifact_name(),
    digest = digest,
  )
}
