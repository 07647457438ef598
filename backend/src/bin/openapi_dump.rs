//! Print a service's OpenAPI document as JSON.
//!
//! Usage: `openapi-dump [student|course]` (defaults to `student`).

use color_eyre::eyre::{Result, eyre};
use enrollment::doc::{CourseApiDoc, StudentApiDoc};
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    let service = std::env::args().nth(1).unwrap_or_else(|| "student".to_owned());
    let doc = match service.as_str() {
        "student" => StudentApiDoc::openapi(),
        "course" => CourseApiDoc::openapi(),
        other => return Err(eyre!("unknown service {other}; expected student or course")),
    };
    println!("{}", doc.to_pretty_json()?);
    Ok(())
}
