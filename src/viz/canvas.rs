//! Scoped drawing surfaces

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::EdaError;

/// Open a bitmap surface at `path`, hand it to `draw`, and write it out.
///
/// The surface is dropped before returning on every path, so no figure
/// outlives the chart that produced it.
pub fn with_canvas<F>(path: &Path, size: (u32, u32), chart: &str, draw: F) -> Result<(), EdaError>
where
    F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> anyhow::Result<()>,
{
    let root = BitMapBackend::new(path, size).into_drawing_area();
    let outcome = root
        .fill(&WHITE)
        .map_err(anyhow::Error::from)
        .and_then(|_| draw(&root))
        .and_then(|_| root.present().map_err(anyhow::Error::from));
    drop(root);

    outcome.map_err(|e| EdaError::render(chart, format!("{:#}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_failed_draw_reports_chart_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.png");

        let err = with_canvas(&path, (20, 20), "broken.png", |_| anyhow::bail!("no data"))
            .unwrap_err();
        match err {
            EdaError::Render { chart, message } => {
                assert_eq!(chart, "broken.png");
                assert!(message.contains("no data"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_directory_is_render_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent").join("chart.png");

        let result = with_canvas(&path, (20, 20), "chart.png", |root| {
            root.draw_pixel((1, 1), &BLACK)?;
            Ok(())
        });
        assert!(matches!(result, Err(EdaError::Render { .. })));
    }
}
