use crate::models::Education;
use crate::parser::blocks::{block_lines, detail_parts, is_detail_line, skip_blank, split_blocks, Period};
use crate::parser::links::clean;
use crate::parser::text::{strip_bold, strip_bullet, strip_heading};

pub fn extract(section: &str) -> Vec<Education> {
    split_blocks(section).iter().map(|b| parse_block(b)).collect()
}

fn parse_block(block: &str) -> Education {
    let lines = block_lines(block);
    let mut edu = Education {
        institution: lines.first().map(|l| clean(strip_heading(l))).unwrap_or_default(),
        ..Education::default()
    };

    let mut i = skip_blank(&lines, 1);
    let Some(first) = lines.get(i).filter(|l| !l.trim_start().starts_with('#')) else {
        return edu;
    };

    // Qualification line, then any further "|" lines as extra credentials.
    let (qualification, period) = split_qualification(first);
    edu.qualification.push(qualification);
    let Period { start, end } = Period::parse(period);
    edu.start = start;
    edu.end = end;
    i += 1;

    loop {
        let next = skip_blank(&lines, i);
        if next >= lines.len() || !is_detail_line(lines[next]) {
            break;
        }
        let (qualification, _) = split_qualification(lines[next]);
        edu.qualification.push(qualification);
        i = next + 1;
    }

    edu.honors_and_grade = lines[i..]
        .iter()
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
        .filter(|l| !l.starts_with('#'))
        .map(|l| clean(strip_bullet(l)))
        .filter(|h| !h.is_empty());

    edu
}

/// "**BSc Computer Science** | 2015 - 2019" → ("BSc Computer Science", "2015 - 2019").
fn split_qualification(line: &str) -> (String, &str) {
    let parts = detail_parts(line);
    let qualification = clean(&strip_bold(parts.first().copied().unwrap_or_default()));
    let period = parts.last().filter(|_| parts.len() > 1).copied().unwrap_or_default();
    (qualification, period)
}
