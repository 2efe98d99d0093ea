use std::fmt::Write;

use tracing::field::{Field, Visit};
use tracing_subscriber::{
  field::RecordFields,
  fmt::{
    format::Writer,
    FormatFields
  }
};

/// Writes the message first, then any extra fields as `name=value`. The bookkeeping fields `threshold` and
/// `critical` are consumed here: the former is never printed, the latter becomes a `[CRITICAL]` prefix.
pub(crate) struct CustomFieldFormatter;

impl<'writer> FormatFields<'writer> for CustomFieldFormatter {
  fn format_fields<R: RecordFields>(
    &self,
    writer: Writer<'writer>,
    fields: R,
  ) -> std::fmt::Result {
    let mut visitor = FieldFilterVisitor { writer, extra: String::new() };
    fields.record(&mut visitor);
    if !visitor.extra.is_empty() {
      write!(visitor.writer, " {}", visitor.extra.trim_end())?;
    }
    Ok(())
  }
}

struct FieldFilterVisitor<'writer> {
  writer: Writer<'writer>,
  /// Fields other than the message, written after it.
  extra : String,
}

impl<'writer> Visit for FieldFilterVisitor<'writer> {
  fn record_i64(&mut self, field: &Field, value: i64) {
    if field.name() != "threshold" {
      let _ = write!(self.extra, "{}={} ", field.name(), value);
    }
  }

  fn record_u64(&mut self, field: &Field, value: u64) {
    if field.name() != "threshold" {
      let _ = write!(self.extra, "{}={} ", field.name(), value);
    }
  }

  fn record_bool(&mut self, field: &Field, value: bool) {
    if field.name() != "critical" {
      let _ = write!(self.extra, "{}={} ", field.name(), value);
    } else if value {
      let _ = write!(self.writer, "[CRITICAL] ");
    }
  }

  fn record_str(&mut self, field: &Field, value: &str) {
    if field.name() == "message" {
      let _ = write!(self.writer, "{}", value);
    } else {
      let _ = write!(self.extra, "{}={:?} ", field.name(), value);
    }
  }

  fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
    match field.name() {

      "message" => {
        let _ = write!(self.writer, "{:?}", value);
      }

      "critical" | "threshold" => {
        // Bookkeeping fields are handled by their typed `record_*` methods.
      }

      name => {
        let _ = write!(self.extra, "{}={:?} ", name, value);
      }

    }
  }

}
