//! PASCAL-VOC annotation loader.
//!
//! Reads `<size>` and every `<object>/<bndbox>` of each XML file in a
//! directory. Part boxes nested deeper inside an object are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::dataset::domain::dataset::Dataset;
use crate::dataset::domain::dataset_loader::{DatasetError, DatasetLoader};
use crate::shared::box_size::BoxSize;
use crate::shared::constants::ANNOTATION_EXTENSION;

pub struct VocXmlLoader {
    normalize: bool,
}

impl VocXmlLoader {
    /// With `normalize`, box extents are divided by the image size so
    /// datasets with mixed resolutions cluster on relative shapes.
    pub fn new(normalize: bool) -> Self {
        Self { normalize }
    }

    /// Loads the boxes of a single annotation file.
    pub fn load_file(&self, path: &Path) -> Result<Dataset, DatasetError> {
        let xml = fs::read_to_string(path).map_err(|e| DatasetError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let annotation = parse_annotation(&xml, path)?;

        let (scale_x, scale_y) = if self.normalize {
            let width = parse_number(path, "size/width", annotation.width.as_deref())?;
            let height = parse_number(path, "size/height", annotation.height.as_deref())?;
            if !(width > 0.0 && height > 0.0) {
                return Err(DatasetError::InvalidImageSize {
                    path: path.to_path_buf(),
                });
            }
            (width, height)
        } else {
            (1.0, 1.0)
        };

        let mut boxes = Vec::with_capacity(annotation.objects.len());
        for object in &annotation.objects {
            let xmin = parse_number(path, "bndbox/xmin", object.xmin.as_deref())? / scale_x;
            let ymin = parse_number(path, "bndbox/ymin", object.ymin.as_deref())? / scale_y;
            let xmax = parse_number(path, "bndbox/xmax", object.xmax.as_deref())? / scale_x;
            let ymax = parse_number(path, "bndbox/ymax", object.ymax.as_deref())? / scale_y;

            let b = BoxSize::new(xmax - xmin, ymax - ymin);
            if b.is_degenerate() {
                log::debug!(
                    "Skipping zero-sized box ({xmin}, {ymin}, {xmax}, {ymax}) in {}",
                    path.display()
                );
                continue;
            }
            boxes.push(b);
        }

        Ok(Dataset::new(boxes))
    }
}

impl Default for VocXmlLoader {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DatasetLoader for VocXmlLoader {
    /// Loads a single file, or every `*.xml` file of a directory in path order.
    fn load(&self, path: &Path) -> Result<Dataset, DatasetError> {
        if path.is_file() {
            return self.load_file(path);
        }

        let files = annotation_files(path)?;
        if files.is_empty() {
            return Err(DatasetError::NoAnnotations {
                path: path.to_path_buf(),
            });
        }

        let mut dataset = Dataset::default();
        for file in &files {
            dataset.extend(self.load_file(file)?);
        }
        log::info!(
            "Loaded {} boxes from {} annotation files",
            dataset.len(),
            files.len()
        );
        Ok(dataset)
    }
}

fn annotation_files(dir: &Path) -> Result<Vec<PathBuf>, DatasetError> {
    let entries = fs::read_dir(dir).map_err(|e| DatasetError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DatasetError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let is_annotation = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(ANNOTATION_EXTENSION))
            .unwrap_or(false);
        if is_annotation && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[derive(Debug, Default)]
struct RawAnnotation {
    width: Option<String>,
    height: Option<String>,
    objects: Vec<RawObject>,
}

#[derive(Debug, Default)]
struct RawObject {
    xmin: Option<String>,
    ymin: Option<String>,
    xmax: Option<String>,
    ymax: Option<String>,
}

impl RawAnnotation {
    /// Stores `text` if the element path names one of the fields we read.
    fn record(&mut self, stack: &[String], text: String) {
        let n = stack.len();
        let at = |back: usize| n.checked_sub(back).map(|i| stack[i].as_str());
        let in_object = stack.iter().any(|s| s == "object");

        match (at(3), at(2), at(1)) {
            (_, Some("size"), Some("width")) if !in_object => self.width = Some(text),
            (_, Some("size"), Some("height")) if !in_object => self.height = Some(text),
            (Some("object"), Some("bndbox"), Some(field)) => {
                if let Some(object) = self.objects.last_mut() {
                    match field {
                        "xmin" => object.xmin = Some(text),
                        "ymin" => object.ymin = Some(text),
                        "xmax" => object.xmax = Some(text),
                        "ymax" => object.ymax = Some(text),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
}

fn parse_annotation(xml: &str, path: &Path) -> Result<RawAnnotation, DatasetError> {
    let xml_error = |source: quick_xml::Error| DatasetError::Xml {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut annotation = RawAnnotation::default();
    let mut stack: Vec<String> = Vec::new();
    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if name == "object" {
                    annotation.objects.push(RawObject::default());
                }
                stack.push(name);
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Text(t) => {
                let text = t.unescape().map_err(xml_error)?.into_owned();
                annotation.record(&stack, text);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(annotation)
}

/// Parses integer or decimal coordinates; VOC tools emit both.
fn parse_number(path: &Path, field: &str, value: Option<&str>) -> Result<f64, DatasetError> {
    let value = value.ok_or_else(|| DatasetError::MissingField {
        path: path.to_path_buf(),
        field: field.to_string(),
    })?;
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| DatasetError::InvalidNumber {
            path: path.to_path_buf(),
            field: field.to_string(),
            value: value.to_string(),
        })
}
