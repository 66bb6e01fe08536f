use std::borrow::Cow;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use xz::bufread::XzDecoder;

use crate::data::osm::{Child, Element};
use crate::errors::{Error, ErrorKind, Result};

/// Opens an `.osm` file, decompressing it on the fly if the name ends in `.xz`.
pub fn open_source(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = fs::File::open(path)
        .map_err(|err| Error::new(ErrorKind::Io, format!("Could not open {}: {}", path.display(), err)))?;
    let file_reader = BufReader::new(file);

    if path.extension().is_some_and(|ext| ext == "xz") {
        let xz_reader = XzDecoder::new(file_reader);
        Ok(Box::new(BufReader::new(xz_reader)))
    } else {
        Ok(Box::new(file_reader))
    }
}

fn name_of(el: &BytesStart) -> Result<String> {
    Ok(str::from_utf8(el.name().as_ref())?.to_string())
}

fn attribute_value(el: &BytesStart, key: &[u8]) -> Result<Option<String>> {
    match el.try_get_attribute(key)? {
        Some(attribute) => Ok(Some(attribute.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn parse_element(el: &BytesStart) -> Result<Element> {
    let mut element = Element::new(&name_of(el)?);
    for attribute_res in el.attributes() {
        let attribute = attribute_res?;
        let key = str::from_utf8(attribute.key.as_ref())?.to_string();
        let value: Cow<str> = attribute.unescape_value()?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

fn parse_child(el: &BytesStart) -> Result<Child> {
    match el.name().as_ref() {
        b"tag" => Ok(Child::Tag {
            k: attribute_value(el, b"k")?,
            v: attribute_value(el, b"v")?,
        }),
        b"nd" => Ok(Child::NodeRef {
            node_ref: attribute_value(el, b"ref")?,
        }),
        _ => Ok(Child::Other(name_of(el)?)),
    }
}

/// Streams the direct children of the document root (`node`, `way`, `relation`,
/// `bounds`, ...) together with their own direct children. Anything nested deeper is
/// skipped, as are text, comments and declarations.
pub struct OsmElements<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    depth: usize,
    current: Option<Element>,
    done: bool,
}

impl<R: BufRead> OsmElements<R> {
    pub fn new(source: R) -> OsmElements<R> {
        let mut reader = Reader::from_reader(source);
        reader.trim_text(true);

        OsmElements {
            reader,
            buf: Vec::new(),
            depth: 0,
            current: None,
            done: false,
        }
    }

    fn read_element(&mut self) -> Result<Option<Element>> {
        loop {
            // nothing borrows from the buffer across iterations
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf)? {
                Event::Eof => {
                    if let Some(element) = &self.current {
                        return Err(format!("Unexpected end of file inside <{}>", element.name).into());
                    }
                    return Ok(None)
                },
                Event::Start(e) => {
                    match self.depth {
                        0 => (),
                        1 => self.current = Some(parse_element(&e)?),
                        2 => {
                            if let Some(current) = self.current.as_mut() {
                                current.children.push(parse_child(&e)?);
                            }
                        },
                        _ => (),
                    }
                    self.depth += 1;
                },
                Event::Empty(e) => {
                    match self.depth {
                        1 => return Ok(Some(parse_element(&e)?)),
                        2 => {
                            if let Some(current) = self.current.as_mut() {
                                current.children.push(parse_child(&e)?);
                            }
                        },
                        _ => (),
                    }
                },
                Event::End(_e) => {
                    self.depth = self.depth.saturating_sub(1);
                    if self.depth == 1 {
                        if let Some(element) = self.current.take() {
                            return Ok(Some(element));
                        }
                    }
                },
                _ => (),
            }
        }
    }
}

impl<R: BufRead> Iterator for OsmElements<R> {
    type Item = Result<Element>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let next = self.read_element().transpose();
        if !matches!(next, Some(Ok(_))) {
            self.done = true;
        }
        next
    }
}
