pub const SETTINGS: &str = "config/fleet.yml";
pub const DEFAULT_INVENTORY: &str = "config.yaml";
