//! XML parsing for workbook metadata not exposed by calamine

use quick_xml::Reader;
use quick_xml::events::Event;
use std::io::BufReader;
use zip::ZipArchive;

use super::ReadError;

/// Extract named-range definitions from an XLSX archive as
/// (name, refers-to text) pairs in workbook document order.
///
/// Definitions live in `xl/workbook.xml` under `<definedNames>`; the element
/// text is the raw reference, e.g. `Data!$B$5`. Workbooks without the part
/// yield an empty list.
pub fn extract_defined_names(
    archive: &mut ZipArchive<impl std::io::Read + std::io::Seek>,
) -> Result<Vec<(String, String)>, ReadError> {
    let mut defined_names = Vec::new();

    let workbook_xml = match archive.by_name("xl/workbook.xml") {
        Ok(file) => file,
        Err(_) => return Ok(defined_names),
    };

    let buf_reader = BufReader::new(workbook_xml);
    let mut reader = Reader::from_reader(buf_reader);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut in_defined_names = false;
    let mut current_name: Option<String> = None;
    let mut current_ref = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"definedNames" => in_defined_names = true,
                b"definedName" if in_defined_names => {
                    current_name = name_attribute(&e);
                    current_ref.clear();
                }
                _ => {}
            },
            // Self-closing definition carries no reference text
            Ok(Event::Empty(e)) if in_defined_names && e.name().as_ref() == b"definedName" => {
                if let Some(name) = name_attribute(&e) {
                    defined_names.push((name, String::new()));
                }
            }
            Ok(Event::Text(e)) if current_name.is_some() => {
                current_ref.push_str(&e.unescape().unwrap_or_default());
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"definedName" => {
                    if let Some(name) = current_name.take() {
                        defined_names.push((name, std::mem::take(&mut current_ref)));
                    }
                }
                b"definedNames" => in_defined_names = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(defined_names)
}

fn name_attribute(e: &quick_xml::events::BytesStart<'_>) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"name" {
            return Some(String::from_utf8_lossy(&attr.value).to_string());
        }
    }
    None
}
