//! ESRI shapefile output for vectorized masks.
//!
//! The `shapefile` crate writes the `.shp`/`.shx`/`.dbf` triple; the
//! WGS-84 `.prj` sidecar is written alongside from a constant WKT, the
//! same string shapefile readers look the AUTHORITY code up in.

use std::fs;
use std::path::Path;

use shapefile::dbase::{FieldName, FieldValue, Record, TableWriterBuilder};
use shapefile::{Point, Polygon, PolygonRing};

use crate::error::{GeosamError, Result};
use crate::vector::MaskFeature;

const WGS84_WKT: &str = "GEOGCS[\"WGS 84\",DATUM[\"WGS_1984\",SPHEROID[\"WGS 84\",6378137,298.257223563,AUTHORITY[\"EPSG\",\"7030\"]],AUTHORITY[\"EPSG\",\"6326\"]],PRIMEM[\"Greenwich\",0,AUTHORITY[\"EPSG\",\"8901\"]],UNIT[\"degree\",0.0174532925199433,AUTHORITY[\"EPSG\",\"9122\"]],AUTHORITY[\"EPSG\",\"4326\"]]";

fn shp_err(path: &Path, reason: impl ToString) -> GeosamError {
    GeosamError::ShapefileWrite { path: path.to_path_buf(), reason: reason.to_string() }
}

/// Write the features as a polygon shapefile at `path` (the `.shp` path;
/// `.shx`, `.dbf`, and `.prj` land next to it).
pub fn write_shapefile(features: &[MaskFeature], path: &Path) -> Result<()> {
    let value_field = FieldName::try_from("VALUE").map_err(|e| shp_err(path, e))?;
    let table = TableWriterBuilder::new().add_numeric_field(value_field, 10, 0);

    let mut writer = shapefile::Writer::from_path(path, table).map_err(|e| shp_err(path, e))?;

    for feature in features {
        let mut rings = Vec::with_capacity(1 + feature.polygon.interiors().len());
        rings.push(PolygonRing::Outer(ring_points(feature.polygon.exterior())));
        for hole in feature.polygon.interiors() {
            rings.push(PolygonRing::Inner(ring_points(hole)));
        }
        let shape = Polygon::with_rings(rings);

        let mut record = Record::default();
        record.insert("VALUE".to_string(), FieldValue::Numeric(Some(f64::from(feature.value))));

        writer.write_shape_and_record(&shape, &record).map_err(|e| shp_err(path, e))?;
    }
    drop(writer);

    fs::write(path.with_extension("prj"), WGS84_WKT)?;
    Ok(())
}

fn ring_points(ring: &geo::LineString<f64>) -> Vec<Point> {
    ring.coords().map(|c| Point::new(c.x, c.y)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, Polygon as GeoPolygon};
    use tempfile::tempdir;

    fn square_feature(value: u8) -> MaskFeature {
        let exterior = LineString::from(vec![
            (13.380, 52.467),
            (13.381, 52.467),
            (13.381, 52.466),
            (13.380, 52.466),
            (13.380, 52.467),
        ]);
        MaskFeature { value, polygon: GeoPolygon::new(exterior, vec![]) }
    }

    #[test]
    fn test_write_produces_all_sidecars() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("masks.shp");

        write_shapefile(&[square_feature(1), square_feature(2)], &path).unwrap();

        for ext in ["shp", "shx", "dbf", "prj"] {
            assert!(path.with_extension(ext).exists(), "missing .{}", ext);
        }
    }

    #[test]
    fn test_written_features_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("masks.shp");
        write_shapefile(&[square_feature(5)], &path).unwrap();

        let mut reader = shapefile::Reader::from_path(&path).unwrap();
        let mut count = 0;
        for row in reader.iter_shapes_and_records() {
            let (shape, record) = row.unwrap();
            assert!(matches!(shape, shapefile::Shape::Polygon(_)));
            match record.get("VALUE") {
                Some(FieldValue::Numeric(Some(v))) => assert_eq!(*v, 5.0),
                other => panic!("unexpected VALUE field: {:?}", other),
            }
            count += 1;
        }
        assert_eq!(count, 1);
    }

    #[test]
    fn test_prj_names_wgs84() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("masks.shp");
        write_shapefile(&[square_feature(1)], &path).unwrap();

        let prj = std::fs::read_to_string(path.with_extension("prj")).unwrap();
        assert!(prj.contains("AUTHORITY[\"EPSG\",\"4326\"]"));
    }
}
