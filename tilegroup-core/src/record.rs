use crate::{
  category::{decode_layout, decode_operator, Category, Field},
  error::CollectError,
};

/// One whitespace separated line of the summary file.
///
/// Fields are borrowed from the line and never reformatted, so a value written
/// to the result tree is byte-for-byte what the benchmark printed.
#[derive(Debug)]
pub struct SummaryRecord<'a> {
  /// 1-based line number in the summary file
  pub line: usize,
  pub category: Category,
  fields: Vec<&'a str>,
}

impl<'a> SummaryRecord<'a> {
  /// Split a summary line. Returns `None` for a blank line.
  pub fn parse(line: usize, category: Category, text: &'a str) -> Option<SummaryRecord<'a>> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.is_empty() {
      return None;
    }
    Some(SummaryRecord {
      line,
      category,
      fields,
    })
  }

  pub fn len(&self) -> usize {
    self.fields.len()
  }

  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }

  /// The raw text of a field.
  pub fn get(&self, field: Field) -> Result<&'a str, CollectError> {
    let index = field.index();
    self
      .fields
      .get(index)
      .copied()
      .ok_or(CollectError::MissingField {
        line: self.line,
        category: self.category,
        field,
        index,
        len: self.fields.len(),
      })
  }

  /// The field as it appears in a directory name: layout and operator codes are
  /// replaced by their labels, everything else is verbatim.
  pub fn decoded(&self, field: Field) -> Result<&'a str, CollectError> {
    let raw = self.get(field)?;
    Ok(match field {
      Field::Layout => decode_layout(raw),
      Field::Operator => decode_operator(raw),
      _ => raw,
    })
  }

  /// The raw text of a field that must hold a number.
  pub fn numeric(&self, field: Field) -> Result<&'a str, CollectError> {
    let raw = self.get(field)?;
    if raw.parse::<f64>().is_err() {
      return Err(CollectError::Malformed {
        line: self.line,
        field,
        value: raw.to_string(),
      });
    }
    Ok(raw)
  }
}
