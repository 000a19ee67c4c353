//! The classify-and-report stage.
//!
//! Reads the combined deck export, writes the categorized export, then
//! writes the markdown summary next to it.

use crate::classify::Classifier;
use crate::config::AnalysisPaths;
use crate::error::Result;
use crate::report::ReportRenderer;
use crate::store;
use crate::types::KeyInformation;

/// Run classification and reporting over the combined export in `paths.output_dir`.
pub fn analyze(
    paths: &AnalysisPaths,
    classifier: &Classifier,
    renderer: &ReportRenderer,
) -> Result<KeyInformation> {
    let combined_path = paths.combined_path();
    log::debug!("Loading combined analysis from {}", combined_path.display());
    let combined = store::load_combined(&combined_path)?;

    let info = classifier.classify(&combined);

    let info_path = paths.key_information_path();
    store::save_key_information(&info_path, &info)?;
    log::info!("Saved key information to: {}", info_path.display());

    let report_path = paths.report_path();
    store::write_report(&report_path, &renderer.render(&info))?;
    log::info!("Saved summary report to: {}", report_path.display());

    Ok(info)
}
