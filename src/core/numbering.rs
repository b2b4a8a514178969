use chrono::{Datelike, NaiveDate};

use super::error::FacturaError;

/// Series used when the issuer has not configured one.
pub const DEFAULT_SERIES: &str = "FAC";

/// Gapless invoice counter for one series and fiscal year.
///
/// Issues `{series}-{year}-{n}` with `n` zero-padded, so the first
/// invoice of 2026 is "FAC-2026-0001". Numbers are correlative within a
/// series and restart every year. Callers serialize access.
#[derive(Debug, Clone)]
pub struct InvoiceNumberSequence {
    series: String,
    year: i32,
    next_number: u64,
    zero_pad: usize,
}

/// The parts of an issued invoice number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceNumber {
    pub series: String,
    pub year: i32,
    pub sequence: u64,
}

impl InvoiceNumberSequence {
    /// First number of `series` in `year` is 1.
    pub fn new(series: impl Into<String>, year: i32) -> Self {
        Self::starting_at(series, year, 1)
    }

    /// Sequence whose next issued number is `next_number`.
    pub fn starting_at(series: impl Into<String>, year: i32, next_number: u64) -> Self {
        Self {
            series: series.into(),
            year,
            next_number,
            zero_pad: 4,
        }
    }

    /// Continue after the highest number already issued in `series` and `year`.
    ///
    /// Numbers from other series or years, and strings that are not invoice
    /// numbers at all, are ignored.
    pub fn resume<'a>(
        series: impl Into<String>,
        year: i32,
        issued: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let series = series.into();
        let last = issued
            .into_iter()
            .filter_map(parse_invoice_number)
            .filter(|n| n.series == series && n.year == year)
            .map(|n| n.sequence)
            .max()
            .unwrap_or(0);
        Self::starting_at(series, year, last.saturating_add(1))
    }

    /// Set zero-padding width (default: 4, so "0001").
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    /// Issue a number and move the counter forward.
    pub fn next_number(&mut self) -> String {
        let number = self.peek();
        self.next_number = self.next_number.saturating_add(1);
        number
    }

    /// The number [`next_number`](Self::next_number) would issue.
    pub fn peek(&self) -> String {
        format!(
            "{}-{}-{:0>width$}",
            self.series,
            self.year,
            self.next_number,
            width = self.zero_pad
        )
    }

    pub fn series(&self) -> &str {
        &self.series
    }

    /// Fiscal year the counter belongs to.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Counter value of the next number, unformatted.
    pub fn next_raw(&self) -> u64 {
        self.next_number
    }

    /// Move to a later fiscal year and restart at 1.
    pub fn advance_year(&mut self, new_year: i32) -> Result<(), FacturaError> {
        if new_year <= self.year {
            return Err(FacturaError::Numbering(format!(
                "series {} is at {}; cannot move to {new_year}",
                self.series, self.year
            )));
        }
        self.year = new_year;
        self.next_number = 1;
        Ok(())
    }

    /// Switch years when `date` falls after the current one; `true` if
    /// the counter was restarted.
    pub fn auto_advance(&mut self, date: NaiveDate) -> bool {
        self.advance_year(date.year()).is_ok()
    }
}

/// Split an invoice number such as "FAC-2026-0008" into its parts.
///
/// The series may itself contain dashes; the year and the sequence are
/// the last two dash-separated fields.
pub fn parse_invoice_number(number: &str) -> Option<InvoiceNumber> {
    let mut parts = number.trim().rsplitn(3, '-');
    let sequence = parts.next()?;
    let year = parts.next()?;
    let series = parts.next()?;

    if series.is_empty()
        || year.len() != 4
        || sequence.is_empty()
        || !year.bytes().all(|b| b.is_ascii_digit())
        || !sequence.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    Some(InvoiceNumber {
        series: series.to_string(),
        year: year.parse().ok()?,
        sequence: sequence.parse().ok()?,
    })
}
