use crate::models::{Designation, Work};
use crate::parser::blocks::{block_lines, detail_parts, is_detail_line, skip_blank, split_blocks, Period};
use crate::parser::links::clean;
use crate::parser::text::{is_bullet, strip_bold, strip_bullet, strip_heading};

pub fn extract(section: &str) -> Vec<Work> {
    split_blocks(section).iter().map(|b| parse_block(b)).collect()
}

/// ```text
/// ### Company
///
/// **Senior Engineer** | Singapore | Jan 2022 - Present
/// **Engineer** | Singapore | Jan 2020 - Dec 2021
///
/// - bullet
/// ```
///
/// One designation per detail line. Bullets belong to the whole block.
fn parse_block(block: &str) -> Work {
    let lines = block_lines(block);
    let company = lines.first().map(|l| clean(strip_heading(l))).unwrap_or_default();

    let mut i = skip_blank(&lines, 1);
    let detail_start = i;
    while i < lines.len() && is_detail_line(lines[i]) {
        i += 1;
    }
    let details = &lines[detail_start..i];

    let descriptions = lines[skip_blank(&lines, i)..]
        .iter()
        .filter(|l| is_bullet(l))
        .map(|l| clean(strip_bullet(l)))
        .filter(|d| !d.is_empty())
        .collect();

    let parsed: Vec<(Designation, String)> = details.iter().map(|l| parse_detail_line(l)).collect();
    let location = parsed.first().map(|(_, loc)| loc.clone()).unwrap_or_default();

    Work {
        company,
        location,
        designations: parsed.into_iter().map(|(d, _)| d).collect(),
        descriptions,
    }
}

/// "title | location | period" → designation plus its location.
/// A two-part line whose second part is a period has no location.
fn parse_detail_line(line: &str) -> (Designation, String) {
    let parts = detail_parts(line);
    let title = parts.first().copied().unwrap_or_default();
    let (location, period) = match parts.as_slice() {
        [_, second] if Period::looks_like(second) => ("", *second),
        [_, second] => (*second, ""),
        [_, location, period, ..] => (*location, *period),
        _ => ("", ""),
    };
    let Period { start, end } = Period::parse(period);

    (
        Designation {
            title: clean(&strip_bold(title)),
            start,
            end,
            descriptions: Vec::new(),
        },
        clean(location),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_role() {
        let work = extract(
            "### [Acme Corp](https://acme.com)\n\n\
             **Product Manager** | Singapore | Jan 2020 - Present\n\n\
             - Launched [Widget](https://acme.com/widget) to 1M users\n\
             - Grew revenue 30%\n",
        );
        assert_eq!(
            work,
            vec![Work {
                company: "Acme Corp".into(),
                location: "Singapore".into(),
                designations: vec![Designation {
                    title: "Product Manager".into(),
                    start: "Jan 2020".into(),
                    end: "Present".into(),
                    descriptions: vec![],
                }],
                descriptions: vec!["Launched Widget to 1M users".into(), "Grew revenue 30%".into()],
            }]
        );
    }

    #[test]
    fn promotions_under_one_employer() {
        let work = extract(
            "### Globex\n\
             **Senior Engineer** | Remote | March 2022 - Present\n\
             **Engineer** | London | June 2019 - February 2022\n\
             \n\
             - Led migration\n",
        );
        assert_eq!(work.len(), 1);
        let titles: Vec<&str> = work[0].designations.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["Senior Engineer", "Engineer"]);
        assert_eq!(work[0].designations[1].start, "June 2019");
        assert_eq!(work[0].designations[1].end, "February 2022");
        assert_eq!(work[0].location, "Remote");
        assert_eq!(work[0].descriptions, vec!["Led migration"]);
    }

    #[test]
    fn multiple_employers_in_order() {
        let work = extract("### A\nX | Y | 2021 - 2022\n### B\nZ | W | 2019 - 2020\n");
        let companies: Vec<&str> = work.iter().map(|w| w.company.as_str()).collect();
        assert_eq!(companies, vec!["A", "B"]);
    }

    #[test]
    fn two_part_detail_line() {
        let work = extract("### Initech\n**Analyst** | Aug 2017 - Dec 2018\n");
        assert_eq!(work[0].location, "");
        assert_eq!(work[0].designations[0].start, "Aug 2017");
        assert_eq!(work[0].designations[0].end, "Dec 2018");
    }

    #[test]
    fn short_block_degrades() {
        let work = extract("### Lonely Co\n");
        assert_eq!(
            work,
            vec![Work {
                company: "Lonely Co".into(),
                ..Work::default()
            }]
        );
    }

    #[test]
    fn block_without_details_keeps_bullets() {
        let work = extract("### Freelance\n\n- Consulting\n");
        assert!(work[0].designations.is_empty());
        assert_eq!(work[0].descriptions, vec!["Consulting"]);
    }

    #[test]
    fn thematic_break_skipped() {
        let work = extract("### Acme\nDev | Oslo | 2020 - 2021\n\n- a\n---\n");
        assert_eq!(work[0].descriptions, vec!["a"]);
    }

    #[test]
    fn unparseable_period() {
        let work = extract("### Acme\nIntern | Paris | summer\n");
        assert_eq!(work[0].designations[0].start, "");
        assert_eq!(work[0].designations[0].end, "");
    }
}
