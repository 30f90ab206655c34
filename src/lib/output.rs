use super::bbox::BBox;
use serde::Serialize;
use serde_json::to_string;
use std::collections::HashMap;
use std::error::Error;
use std::io::Write;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
    GeoJson,
}

impl Format {
    pub const VARIANTS: [&'static str; 3] = ["text", "json", "geojson"];
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            "geojson" => Ok(Format::GeoJson),
            _ => Err(format!("unknown format: {}", s)),
        }
    }
}

pub trait Output {
    fn write_text(&self, writer: &mut dyn Write) -> Result<(), Box<dyn Error>>;
    fn write_json(&self, writer: &mut dyn Write) -> Result<(), Box<dyn Error>>;
    fn write_geojson(&self, writer: &mut dyn Write) -> Result<(), Box<dyn Error>>;

    fn write_as(&self, format: Format, writer: &mut dyn Write) -> Result<(), Box<dyn Error>> {
        match format {
            Format::Text => self.write_text(writer),
            Format::Json => self.write_json(writer),
            Format::GeoJson => self.write_geojson(writer),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon { coordinates: Vec<Vec<(f64, f64)>> },
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum Entity {
    Feature {
        bbox: BBox,
        properties: HashMap<String, String>,
        geometry: Geometry,
    },
}

impl Output for BBox {
    fn write_text(&self, writer: &mut dyn Write) -> Result<(), Box<dyn Error>> {
        writeln!(writer, "Total bbox: {}", self)?;
        Ok(())
    }

    fn write_json(&self, writer: &mut dyn Write) -> Result<(), Box<dyn Error>> {
        writeln!(writer, "{}", to_string(self)?)?;
        Ok(())
    }

    fn write_geojson(&self, writer: &mut dyn Write) -> Result<(), Box<dyn Error>> {
        let geometry = Geometry::Polygon {
            coordinates: vec![self.exterior()],
        };
        let entity = Entity::Feature {
            bbox: *self,
            properties: HashMap::new(),
            geometry,
        };
        writeln!(writer, "{}", to_string(&entity)?)?;
        Ok(())
    }
}
