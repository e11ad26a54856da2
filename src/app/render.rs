use crate::domain::model::College;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// 一頁要輸出的結果
#[derive(Debug, Clone, Copy)]
pub struct ResultPage<'a> {
    pub location: &'a str,
    pub colleges: &'a [College],
    pub shown: usize,
    pub total: usize,
}

pub fn render<W: Write>(writer: &mut W, format: OutputFormat, page: &ResultPage<'_>) -> Result<()> {
    match format {
        OutputFormat::Text => render_text(writer, page),
        OutputFormat::Json => render_json(writer, page.colleges),
        OutputFormat::Csv => render_csv(writer, page.colleges),
    }
}

pub fn render_header<W: Write>(writer: &mut W, page: &ResultPage<'_>) -> Result<()> {
    writeln!(writer, "🎓 Colleges Found in {}", page.location)?;
    write!(
        writer,
        "Showing {} of {} college{}",
        page.shown,
        page.total,
        if page.total == 1 { "" } else { "s" }
    )?;
    if page.total > page.shown {
        write!(writer, " • {} more available", page.total - page.shown)?;
    }
    writeln!(writer)?;
    Ok(())
}

pub fn render_card<W: Write>(writer: &mut W, college: &College) -> Result<()> {
    writeln!(writer, "┌─ {}  [{}]", college.name, college.college_type.label())?;
    writeln!(writer, "│ 📍 Address: {}", college.address)?;

    let contact = &college.contact_details;
    if contact.is_empty() {
        writeln!(writer, "│ 📞 Contact: not provided")?;
    }
    if let Some(phone) = &contact.phone {
        writeln!(writer, "│ 📞 Phone: {}", phone)?;
    }
    if let Some(email) = &contact.email {
        writeln!(writer, "│ ✉️  Email: {}", email)?;
    }
    if let Some(website) = &contact.website {
        writeln!(writer, "│ 🌐 Website: {}", website)?;
    }

    if college.courses_available.is_empty() {
        writeln!(writer, "│ 📚 Courses: not listed")?;
    } else {
        writeln!(writer, "│ 📚 Courses: {}", college.courses_available.join(", "))?;
    }

    if college.fees.is_empty() {
        writeln!(writer, "│ 💰 Fees: not listed")?;
    } else {
        writeln!(writer, "│ 💰 Fees:")?;
        let width = college
            .fees
            .iter()
            .map(|fee| fee.course.chars().count())
            .max()
            .unwrap_or(0);
        for fee in &college.fees {
            writeln!(writer, "│    {:<width$}  {}", fee.course, fee.amount, width = width)?;
        }
    }
    writeln!(writer, "└─")?;
    Ok(())
}

fn render_text<W: Write>(writer: &mut W, page: &ResultPage<'_>) -> Result<()> {
    render_header(writer, page)?;
    writeln!(writer)?;
    for college in page.colleges {
        render_card(writer, college)?;
    }
    if page.total > page.shown {
        writeln!(
            writer,
            "📚 {} remaining, type 'more' to load more colleges",
            page.total - page.shown
        )?;
    }
    Ok(())
}

fn render_json<W: Write>(writer: &mut W, colleges: &[College]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, colleges)?;
    writeln!(writer)?;
    Ok(())
}

fn render_csv<W: Write>(writer: &mut W, colleges: &[College]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "name", "address", "type", "phone", "email", "website", "courses", "fees",
    ])?;

    for college in colleges {
        let contact = &college.contact_details;
        let fees = college
            .fees
            .iter()
            .map(|fee| format!("{}: {}", fee.course, fee.amount))
            .collect::<Vec<_>>()
            .join("; ");
        csv_writer.write_record([
            college.name.as_str(),
            college.address.as_str(),
            college.college_type.label(),
            contact.phone.as_deref().unwrap_or(""),
            contact.email.as_deref().unwrap_or(""),
            contact.website.as_deref().unwrap_or(""),
            college.courses_available.join("; ").as_str(),
            fees.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
