use std::path::Path;

use crate::catalog::{self, Catalog};
use crate::config;

/// Build the catalog: user manifest, assets scan, or the embedded default.
pub fn load_catalog(settings: &config::Settings) -> Catalog {
    let assets_root = Path::new(&settings.catalog.assets_dir);

    if let Some(path) = &settings.catalog.manifest_path {
        match catalog::load_manifest(Path::new(path), assets_root) {
            Ok(c) => return c,
            Err(e) => {
                log::warn!("catalog: failed to load manifest {path}: {e}; using embedded catalog")
            }
        }
    } else if settings.catalog.scan {
        let scanned = catalog::scan_assets(assets_root);
        if !scanned.is_empty() {
            return scanned;
        }
        log::warn!(
            "catalog: scan of {} found no genres; using embedded catalog",
            assets_root.display()
        );
    }

    catalog::embedded_catalog(assets_root)
}
