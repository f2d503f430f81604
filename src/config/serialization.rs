//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML document
    pub fn to_toml(&self) -> String {
        format!(
            r#"# commune-atlas configuration

# Web view bind address (ATLAS_BIND overrides)
bind_addr = "{bind}"

# Map display
[map]
# Focus used while no commune is selected (centre of Corsica)
center_lat = {center_lat:?}
center_lon = {center_lon:?}
zoom = {zoom}
tile_url = {tile_url:?}
attribution = {attribution:?}

# CSV export
[export]
filename = {filename:?}
header = "{header}"  # fields, labels
# Directory used by the terminal view (ATLAS_EXPORT_DIR overrides)
dir = {export_dir:?}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# JSON file logging (in addition to TUI buffer or stdout)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir:?}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix:?}
"#,
            bind = self.bind_addr,
            center_lat = self.map.center_lat,
            center_lon = self.map.center_lon,
            zoom = self.map.zoom,
            tile_url = self.map.tile_url,
            attribution = self.map.attribution,
            filename = self.export.filename,
            header = self.export.header.as_str(),
            export_dir = self.export.dir.display().to_string(),
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display().to_string(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let Some(path) = Self::config_path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config path",
            ));
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml())
    }
}
