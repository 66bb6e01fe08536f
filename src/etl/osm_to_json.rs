use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::UserConfig;
use crate::data::record::Record;
use crate::errors::Result;
use crate::etl::Etl;
use crate::etl::parse_osm::{open_source, OsmElements};
use crate::shape::shape_element;

pub const ETL_NAME: &str = "osm_to_json";

pub struct OsmToJsonEtl<'a> {
    config: &'a UserConfig,
}

impl OsmToJsonEtl<'_> {
    pub fn new(config: &UserConfig) -> OsmToJsonEtl {
        OsmToJsonEtl {
            config
        }
    }
}

/// One JSON object per line. Non-ASCII text is written as is.
pub fn write_records<W: Write>(writer: &mut W, records: &[Record], pretty: bool) -> Result<()> {
    for record in records {
        if pretty {
            serde_json::to_writer_pretty(&mut *writer, record)?;
        } else {
            serde_json::to_writer(&mut *writer, record)?;
        }
        writer.write_all(b"\n")?;
    }
    Ok(())
}

impl Etl for OsmToJsonEtl<'_> {
    type Input = OsmElements<Box<dyn BufRead>>;
    type Output = Vec<Record>;

    fn etl_name(&self) -> &str {
        ETL_NAME
    }

    fn output_path(&self) -> PathBuf {
        self.config.output_path()
    }

    fn extract(&mut self) -> Result<Self::Input> {
        let source = open_source(Path::new(&self.config.data_path))?;
        Ok(OsmElements::new(source))
    }

    fn transform(&mut self, input: Self::Input) -> Result<Self::Output> {
        let mut records: Vec<Record> = Vec::new();
        let mut elements_read: usize = 0;
        let mut elements_ignored: usize = 0;
        let mut elements_failed: usize = 0;

        for element_res in input {
            let element = element_res?;
            elements_read += 1;

            match shape_element(&element) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {
                    debug!(element = element.label().as_str(); "Ignoring element");
                    elements_ignored += 1;
                },
                Err(err) if self.config.skip_invalid_elements => {
                    warn!(element = element.label().as_str(), err = err.message.as_str(); "Skipping element that could not be shaped");
                    elements_failed += 1;
                },
                Err(err) => return Err(err),
            }
        }

        info!(
            etl_name = self.etl_name(),
            elements_read = elements_read,
            records = records.len(),
            elements_ignored = elements_ignored,
            elements_failed = elements_failed;
            "Shaped elements"
        );
        Ok(records)
    }

    fn load(&mut self, output: Self::Output) -> Result<usize> {
        let output_file = File::create(self.config.output_path())?;
        let mut writer = BufWriter::new(output_file);
        write_records(&mut writer, &output, self.config.pretty)?;
        writer.flush()?;
        Ok(output.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::data::record::ElementType;
    use serde_json::{json, Value};
    use std::fs;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6">
  <bounds minlat="34.9" minlon="135.6" maxlat="35.1" maxlon="135.8"/>
  <node id="1" lat="34.9" lon="135.7" version="3" uid="5"/>
  <node id="2" lat="north" lon="135.7"/>
  <node id="3" lat="35.0" lon="135.75">
    <tag k="addr:city" v="京都市中京区"/>
    <tag k="addr:postcode" v="６０４－８００１"/>
  </node>
  <way id="4">
    <nd ref="1"/>
    <nd ref="3"/>
    <tag k="type" v="multipolygon"/>
  </way>
  <relation id="5"><member type="way" ref="4" role="outer"/></relation>
</osm>
"#;

    fn config_for(dir: &Path, pretty: bool, skip_invalid_elements: bool) -> UserConfig {
        let data_path = dir.join("kyoto.osm");
        fs::write(&data_path, SAMPLE).unwrap();
        UserConfig {
            data_path: data_path.to_string_lossy().into_owned(),
            output_path: None,
            pretty,
            force: false,
            skip_invalid_elements,
            log_level: "info".to_string(),
        }
    }

    fn read_lines(path: &Path) -> Vec<Value> {
        fs::read_to_string(path).unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn writes_one_json_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), false, true);
        assert_eq!(OsmToJsonEtl::new(&config).process().unwrap(), Some(3));

        let output_path = dir.path().join("kyoto.osm.json");
        assert_eq!(config.output_path(), output_path);
        assert_eq!(read_lines(&output_path), vec![
            json!({"type": "node", "id": "1", "pos": [34.9, 135.7], "created": {"version": "3", "uid": "5"}}),
            json!({
                "type": "node",
                "id": "3",
                "pos": [35.0, 135.75],
                "address": {"city": "京都市", "street": "中京区", "postcode": "6048001"},
            }),
            json!({"type": "way", "id": "4", "type_m": "multipolygon", "node_refs": ["1", "3"]}),
        ]);
    }

    #[test]
    fn non_ascii_is_written_literally() {
        let mut out: Vec<u8> = Vec::new();
        let mut record = Record::new(ElementType::Node);
        record.set_address("city", "京都市".to_string());
        write_records(&mut out, &[record], false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"type\":\"node\",\"address\":{\"city\":\"京都市\"}}\n");
    }

    #[test]
    fn pretty_output_is_indented() {
        let mut out: Vec<u8> = Vec::new();
        let records = vec![Record::new(ElementType::Node), Record::new(ElementType::Way)];
        write_records(&mut out, &records, true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"type\": \"node\"\n}\n{\n  \"type\": \"way\"\n}\n");
    }

    #[test]
    fn strict_mode_aborts_on_bad_element() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), false, false);
        let err = OsmToJsonEtl::new(&config).process().unwrap_err();
        assert_eq!(err.kind, ErrorKind::NumericParse);
        assert!(!config.output_path().exists());
    }

    #[test]
    fn existing_output_is_reused_until_cleaned() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), false, true);
        fs::write(config.output_path(), "cached\n").unwrap();

        let mut etl = OsmToJsonEtl::new(&config);
        assert_eq!(etl.process().unwrap(), None);
        assert_eq!(fs::read_to_string(config.output_path()).unwrap(), "cached\n");

        etl.clean().unwrap();
        assert!(!etl.is_cached().unwrap());
        assert_eq!(etl.process().unwrap(), Some(3));
        assert_eq!(read_lines(&config.output_path()).len(), 3);
    }
}
