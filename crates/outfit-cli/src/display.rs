//! Terminal rendering of predictions and suggestions.

use std::io::{self, Write};

use outfit_core::{Prediction, display_name};
use outfit_gallery::BuildReport;

use crate::suggest::{Recommendations, Suggestion};

pub const NO_RECOMMENDATIONS: &str = "No suggestions configured for this shirt type yet.";
pub const NO_EXAMPLES: &str = "No example images found in the gallery for this type.";

pub fn write_prediction(out: &mut impl Write, prediction: &Prediction) -> io::Result<()> {
    writeln!(out, "Predicted shirt category: {}", prediction.category())?;
    writeln!(out, "Confidence: {}", prediction.confidence_label())
}

pub fn write_suggestion(out: &mut impl Write, suggestion: &Suggestion) -> io::Result<()> {
    write_prediction(out, &suggestion.prediction)?;
    writeln!(out)?;
    writeln!(out, "Suggested bottoms")?;

    match &suggestion.recommendations {
        Recommendations::NotConfigured => writeln!(out, "  {NO_RECOMMENDATIONS}")?,
        Recommendations::Bottoms(bottoms) => {
            for bottom in bottoms {
                writeln!(out, "  {}", display_name(&bottom.category))?;
                if bottom.examples.is_empty() {
                    writeln!(out, "    {NO_EXAMPLES} ({})", bottom.gallery_id)?;
                    continue;
                }
                for path in &bottom.examples {
                    writeln!(out, "    {}", path.display())?;
                }
            }
        }
    }
    Ok(())
}

pub fn write_build_report(out: &mut impl Write, report: &BuildReport) -> io::Result<()> {
    writeln!(
        out,
        "  {:<16} {:<16} {:>7} {:>7} {:>7} {:>7} {:>7}",
        "category", "identifier", "matched", "sampled", "copied", "present", "missing"
    )?;
    for c in &report.categories {
        writeln!(
            out,
            "  {:<16} {:<16} {:>7} {:>7} {:>7} {:>7} {:>7}",
            c.category,
            c.identifier,
            c.matched,
            c.sampled,
            c.copied,
            c.already_present,
            c.missing_source
        )?;
    }
    writeln!(
        out,
        "  {} copied, {} already present, {} missing source files",
        report.copied(),
        report.already_present(),
        report.missing_source()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggest::BottomSuggestion;
    use outfit_gallery::CategoryReport;
    use std::path::PathBuf;

    fn render(s: &Suggestion) -> String {
        let mut buf = Vec::new();
        write_suggestion(&mut buf, s).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn prediction_two_decimals() {
        let mut buf = Vec::new();
        write_prediction(&mut buf, &Prediction::new("Hoodie", 0.91234)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Predicted shirt category: Hoodie"));
        assert!(text.contains("Confidence: 0.91"));
    }

    #[test]
    fn not_configured_message() {
        let text = render(&Suggestion {
            prediction: Prediction::new("Blazer", 0.5),
            recommendations: Recommendations::NotConfigured,
        });
        assert!(text.contains(NO_RECOMMENDATIONS));
    }

    #[test]
    fn bottoms_with_and_without_examples() {
        let text = render(&Suggestion {
            prediction: Prediction::new("Cardigan", 0.5),
            recommendations: Recommendations::Bottoms(vec![
                BottomSuggestion {
                    category: "Dress".into(),
                    gallery_id: "dress_pants".into(),
                    examples: vec![PathBuf::from("g/dress_pants/a.jpg")],
                },
                BottomSuggestion {
                    category: "cargo_shorts".into(),
                    gallery_id: "cargo_shorts".into(),
                    examples: vec![],
                },
            ]),
        });
        assert!(text.contains("  Dress\n    g/dress_pants/a.jpg\n"));
        assert!(text.contains(&format!("  Cargo Shorts\n    {NO_EXAMPLES} (cargo_shorts)\n")));
    }

    #[test]
    fn build_report_totals() {
        let report = BuildReport {
            categories: vec![CategoryReport {
                category: "Jeans".into(),
                identifier: "jeans".into(),
                matched: 40,
                sampled: 20,
                copied: 18,
                already_present: 0,
                missing_source: 2,
            }],
        };
        let mut buf = Vec::new();
        write_build_report(&mut buf, &report).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("18 copied, 0 already present, 2 missing source files"));
    }
}
