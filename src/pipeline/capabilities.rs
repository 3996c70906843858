//! Startup check for runtime components the charts depend on
//!
//! Every probe runs before anything is reported, so the diagnostic names all
//! missing components at once instead of failing on first use.

use std::io::Cursor;

use plotters::style::{FontDesc, FontFamily, FontStyle};

use crate::error::{EdaError, MissingCapability};

/// Comma-separated capability names to treat as missing without probing
pub const DISABLE_ENV: &str = "DIAMOND_EDA_DISABLE_CAPABILITIES";

/// A named component with a probe that reports whether it is usable
pub struct Capability {
    pub info: MissingCapability,
    pub probe: fn() -> bool,
}

/// Components every run needs
pub fn required_capabilities() -> Vec<Capability> {
    vec![
        Capability {
            info: MissingCapability {
                name: "sans-serif font",
                system_package: "fonts-dejavu-core fontconfig",
                env_package: "fonts-conda-ecosystem fontconfig",
            },
            probe: probe_sans_serif_font,
        },
        Capability {
            info: MissingCapability {
                name: "png encoder",
                system_package: "libpng-dev",
                env_package: "libpng",
            },
            probe: probe_png_encoder,
        },
    ]
}

/// Probe the required components, honouring `DISABLE_ENV`
pub fn check_capabilities() -> Result<(), EdaError> {
    let disabled = std::env::var(DISABLE_ENV).unwrap_or_default();
    check_with(&without(required_capabilities(), &disabled))
}

/// Replace the probe of every capability named in `disabled`
fn without(capabilities: Vec<Capability>, disabled: &str) -> Vec<Capability> {
    capabilities
        .into_iter()
        .map(|c| {
            if disabled.split(',').any(|n| n.trim() == c.info.name) {
                Capability {
                    probe: unavailable,
                    ..c
                }
            } else {
                c
            }
        })
        .collect()
}

fn unavailable() -> bool {
    false
}

/// Probe `capabilities`, collecting every failure
pub fn check_with(capabilities: &[Capability]) -> Result<(), EdaError> {
    let missing: Vec<MissingCapability> = capabilities
        .iter()
        .filter(|c| {
            let ok = (c.probe)();
            log::debug!("capability '{}': {}", c.info.name, if ok { "ok" } else { "missing" });
            !ok
        })
        .map(|c| c.info.clone())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(EdaError::DependencyMissing { missing })
    }
}

/// Diagnostic text with both remediation command lines
pub fn diagnostic(missing: &[MissingCapability]) -> String {
    let names: Vec<&str> = missing.iter().map(|m| m.name).collect();
    let system: Vec<&str> = missing.iter().map(|m| m.system_package).collect();
    let env: Vec<&str> = missing.iter().map(|m| m.env_package).collect();

    format!(
        "Error: required component(s) not available: {}\n\
         Install dependencies with:\n  sudo apt-get install -y {}\n\
         Or install them into a project environment:\n  conda create -y -p .venv -c conda-forge {}",
        names.join(", "),
        system.join(" "),
        env.join(" ")
    )
}

fn probe_sans_serif_font() -> bool {
    FontDesc::new(FontFamily::SansSerif, 12.0, FontStyle::Normal)
        .box_size("Ag")
        .is_ok()
}

fn probe_png_encoder() -> bool {
    let pixel = image::RgbImage::new(1, 1);
    let mut buf = Cursor::new(Vec::new());
    pixel.write_to(&mut buf, image::ImageFormat::Png).is_ok()
}
