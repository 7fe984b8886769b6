//! Per-product, per-client report generation. The write lock is held for
//! the whole operation: the report sorts the shared review list in place,
//! and the file write happens under the same hold.

use std::fs;

use log::warn;

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::locale::Formatter;
use crate::review::by_rating_desc;

impl Catalog {
    /// Render one product's report, write it to the per-client report file,
    /// and return the text. A missing id or an I/O failure is logged and
    /// yields `None`.
    pub fn print_product_report(
        &self,
        id: u32,
        language_tag: &str,
        client: &str,
    ) -> Option<String> {
        match self.try_report(id, language_tag, client) {
            Ok(text) => Some(text),
            Err(err) => {
                warn!("report for product {} not written: {}", id, err);
                None
            }
        }
    }

    fn try_report(
        &self,
        id: u32,
        language_tag: &str,
        client: &str,
    ) -> Result<String, CatalogError> {
        let formatter = Formatter::for_tag(language_tag);
        let mut entries = self.write_entries("report")?;
        let entry = entries.get_mut(&id).ok_or(CatalogError::NotFound { id })?;
        entry.reviews.sort_by(by_rating_desc);

        let mut txt = String::new();
        txt.push_str(&formatter.format_product(&entry.product));
        txt.push('\n');
        if entry.reviews.is_empty() {
            txt.push_str(formatter.no_reviews());
            txt.push('\n');
        } else {
            for review in &entry.reviews {
                txt.push_str(&formatter.format_review(review));
                txt.push('\n');
            }
        }

        fs::create_dir_all(&self.config.reports_folder)?;
        fs::write(self.config.report_path(id, client), &txt)?;
        Ok(txt)
    }
}
