use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;
use zonefold::Region;

/// Metadata used to generate a provenance sidecar.
pub struct Payload {
    pub params: Value,
    pub region: Option<Value>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            region: None,
        }
    }

    /// Attach a short summary of the folded region.
    pub fn with_region(mut self, region: &Region) -> Self {
        self.region = Some(region_summary(region));
        self
    }
}

/// Polygon count, area and bbox; enough to spot a collapsed fold without opening the artifact.
pub fn region_summary(region: &Region) -> Value {
    let bbox = region
        .bounding_rect()
        .map(|r| [r.min().x, r.min().y, r.max().x, r.max().y]);
    json!({
        "empty": region.is_empty(),
        "polygons": region.polygon_count(),
        "area_deg2": region.area_deg2(),
        "bbox": bbox,
    })
}

/// Write `<artifact>.provenance.json` containing the git commit, callsite, params, and outputs.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let provenance_path = provenance_path(artifact);
    if let Some(parent) = provenance_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let doc = json!({
        "code_rev": current_git_rev(),
        "engine_version": zonefold::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "params": payload.params,
        "region": payload.region,
        "outputs": [artifact.to_string_lossy()]
    });
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    Ok(provenance_path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

pub fn current_git_rev() -> String {
    if let Some(baked) = option_env!("GIT_COMMIT").filter(|s| !s.is_empty()) {
        return baked.to_string();
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn provenance_path_replaces_extension() {
        let base = Path::new("/tmp/round/region.geojson");
        assert_eq!(
            provenance_path(base),
            Path::new("/tmp/round/region.provenance.json")
        );
    }

    #[test]
    fn sidecar_records_outputs_and_region() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("region.geojson");
        fs::write(&artifact, "{}").unwrap();
        let region = Region::from_bbox(0.0, 0.0, 2.0, 1.0);
        let payload = Payload::new(json!({"threaded": false})).with_region(&region);
        let prov_path = write_sidecar(&artifact, payload).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["region"]["polygons"], 1);
        assert_eq!(parsed["region"]["empty"], false);
        assert!((parsed["region"]["area_deg2"].as_f64().unwrap() - 2.0).abs() < 1e-12);
        assert_eq!(parsed["callsite"]["file"], file!());
    }

    #[test]
    fn empty_region_summary_has_no_bbox() {
        let summary = region_summary(&Region::empty());
        assert_eq!(summary["empty"], true);
        assert!(summary["bbox"].is_null());
    }
}
