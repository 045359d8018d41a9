//! CSV codec for question files.
//!
//! Column order is fixed and positional; the header line is never matched by
//! name. The `options` and `correct_answers` cells hold JSON array literals,
//! so they usually contain both commas and quotes.
//!
//! Quoting follows RFC 4180: a quote toggles the quoted state, a doubled
//! quote inside a quoted field is a literal quote, and a quoted field may
//! span physical lines.

use crate::error::{CodecError, RowError};
use crate::model::{Difficulty, OptionIndex, QuestionInput};
use crate::record::BulkImportQuestion;

/// Column names, in file order.
pub const CSV_HEADERS: [&str; 9] = [
    "question_text",
    "question_type",
    "options",
    "correct_answers",
    "difficulty",
    "points",
    "explanation",
    "code_language",
    "is_public",
];

/// MIME type handed to the export sink for CSV payloads.
pub const CSV_MIME_TYPE: &str = "text/csv";

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

/// Split one CSV record into its fields.
///
/// Quote characters are consumed rather than kept, except for a doubled quote
/// inside a quoted field which yields one literal quote. Commas inside quotes
/// are field content.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

/// One logical CSV record and the physical line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRecord {
    /// 1-based line number of the record's first line.
    pub line: usize,
    /// Raw record text; contains newlines when a quoted field spans lines.
    pub text: String,
}

/// Group the physical lines of `text` into logical records.
///
/// Blank lines are skipped. A line that opens a quoted field is joined with
/// the following lines up to the one that closes it, keeping their original
/// line terminators. The join is refused when any line it would absorb is a
/// well-formed row on its own: the opening line then becomes an
/// `unterminated quoted field` error and reading resumes on the next line.
/// A stray quote therefore never swallows valid rows.
pub fn split_records(text: &str) -> Vec<Result<CsvRecord, RowError>> {
    let raw: Vec<&str> = text.split_inclusive('\n').collect();
    let lines: Vec<&str> = raw.iter().map(|l| strip_terminator(l)).collect();
    let odd_quotes: Vec<bool> = lines
        .iter()
        .map(|l| l.bytes().filter(|&b| b == b'"').count() % 2 == 1)
        .collect();

    // next_odd[i] = first j >= i whose line has an odd quote count.
    let mut next_odd = vec![None; lines.len() + 1];
    for i in (0..lines.len()).rev() {
        next_odd[i] = if odd_quotes[i] { Some(i) } else { next_odd[i + 1] };
    }

    let mut records = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let line_no = i + 1;

        if !odd_quotes[i] {
            if !lines[i].trim().is_empty() {
                records.push(Ok(CsvRecord {
                    line: line_no,
                    text: lines[i].to_string(),
                }));
            }
            i += 1;
            continue;
        }

        let closing = next_odd[i + 1]
            .filter(|&end| !lines[i + 1..=end].iter().any(|l| is_complete_row(l)));
        match closing {
            Some(end) => {
                let joined: String = raw[i..=end].concat();
                records.push(Ok(CsvRecord {
                    line: line_no,
                    text: strip_terminator(&joined).to_string(),
                }));
                i = end + 1;
            }
            None => {
                records.push(Err(RowError::line(line_no, "unterminated quoted field")));
                i += 1;
            }
        }
    }

    records
}

fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Whether a single physical line already parses as a full question row.
fn is_complete_row(line: &str) -> bool {
    parse_csv_row(&parse_csv_line(line)).is_ok()
}

// ---------------------------------------------------------------------------
// Row parser
// ---------------------------------------------------------------------------

/// Map a header-ordered row of cells to a record.
///
/// The `options` and `correct_answers` cells are parsed as JSON arrays of
/// strings and integers. Missing optional cells take their defaults. The
/// error is a bare message; callers attach the line number.
pub fn parse_csv_row(values: &[String]) -> Result<BulkImportQuestion, String> {
    if values.len() < 4 {
        return Err(format!(
            "expected at least 4 columns, found {}",
            values.len()
        ));
    }

    let cell = |i: usize| values.get(i).map(|s| s.trim()).unwrap_or("");

    let question_type = cell(1).parse()?;

    let options: Vec<String> = serde_json::from_str(cell(2))
        .map_err(|e| format!("invalid options JSON: {e}"))?;

    let correct_answers: Vec<OptionIndex> = serde_json::from_str(cell(3))
        .map_err(|e| format!("invalid correct_answers JSON: {e}"))?;

    let difficulty = match cell(4) {
        "" => Difficulty::default(),
        d => d.parse()?,
    };

    // Only an empty cell defaults to 1. Anything else must be a whole
    // number; `abc` or `1.5` is a row error rather than a silent 1.
    let points = match cell(5) {
        "" => 1,
        p => p
            .parse::<i64>()
            .map_err(|_| format!("invalid points value: {p}"))?,
    };

    let optional = |i: usize| Some(values.get(i)?.as_str()).filter(|s| !s.trim().is_empty());

    Ok(BulkImportQuestion {
        question_text: values[0].clone(),
        question_type,
        options,
        correct_answers,
        explanation: optional(6).map(str::to_string),
        difficulty,
        points,
        code_language: optional(7).map(|s| s.trim().to_string()),
        is_public: cell(8).eq_ignore_ascii_case("true"),
    })
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

fn csv_cells(question: &QuestionInput) -> Result<[String; 9], CodecError> {
    Ok([
        question.question_text.clone(),
        question.question_type().as_str().to_string(),
        serde_json::to_string(&question.options)?,
        serde_json::to_string(&question.correct_answers)?,
        question.difficulty.as_str().to_string(),
        question.points.to_string(),
        question.explanation.clone().unwrap_or_default(),
        question.code_language().unwrap_or_default().to_string(),
        question.is_public.to_string(),
    ])
}

fn write_csv<'a>(
    questions: impl IntoIterator<Item = &'a QuestionInput>,
) -> Result<String, CodecError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for question in questions {
        writer.write_record(csv_cells(question)?)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CodecError::Flush(e.error().to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Serialize questions to CSV text: the header line, then one line per question.
///
/// Cells containing commas, quotes, or newlines are quoted with internal
/// quotes doubled, which is what [`parse_csv_line`] expects.
pub fn questions_to_csv<Q: AsRef<QuestionInput>>(questions: &[Q]) -> Result<String, CodecError> {
    write_csv(questions.iter().map(AsRef::as_ref))
}

/// A downloadable starting file: the header and one example row.
pub fn csv_template() -> Result<String, CodecError> {
    let example = BulkImportQuestion {
        question_text: "What is the capital of France?".into(),
        question_type: crate::model::QuestionType::SingleChoice,
        options: vec![
            "London".into(),
            "Paris".into(),
            "Berlin".into(),
            "Madrid".into(),
        ],
        correct_answers: vec![1],
        explanation: Some("Paris is the capital and largest city of France.".into()),
        difficulty: Difficulty::Easy,
        points: 1,
        code_language: None,
        is_public: false,
    }
    .into_input("");

    write_csv([&example])
}
