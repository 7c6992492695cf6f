use hazardmap_core::config::DEFAULT_TILE_URL;

/// Raster base-map tile provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSource {
    /// URL template with `{s}`, `{z}`, `{x}`, `{y}` and `{r}` placeholders
    pub template: String,
    pub attribution: String,
    pub subdomains: Vec<String>,
    pub max_zoom: u8,
    /// Request high-density (`@2x`) tiles
    pub retina: bool,
}

impl Default for TileSource {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_URL)
    }
}

impl TileSource {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            attribution: "© OpenStreetMap contributors © CARTO".to_string(),
            subdomains: ["a", "b", "c"].iter().map(|s| s.to_string()).collect(),
            max_zoom: 19,
            retina: false,
        }
    }

    /// Concrete URL of one tile
    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> String {
        let subdomain = if self.subdomains.is_empty() {
            ""
        } else {
            let index = (x as usize + y as usize) % self.subdomains.len();
            self.subdomains[index].as_str()
        };

        self.template
            .replace("{s}", subdomain)
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
            .replace("{r}", if self.retina { "@2x" } else { "" })
    }
}
