use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use tracing::debug;

use crate::dom::{Node, find_heading, section_after, section_before};
use crate::error::ScrapeError;
use crate::models::ShoeRecord;

/// Labels picked out of free text in the lab section when no table carries them.
const LAB_FIELDS: [&str; 6] = [
    "Heel stack",
    "Forefoot stack",
    "Drop",
    "Weight",
    "Midsole softness",
    "Secondary foam softness",
];

/// `label`, anything, then a number with its unit ("32 mm", "8.5mm", "24.5 HA", "12%").
static LAB_FIELD_RES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    LAB_FIELDS
        .iter()
        .map(|&field| {
            let pattern = format!(r"{}.*?([\d.,]+ ?[a-zA-Z%°]+)", regex::escape(field));
            (field, Regex::new(&pattern).unwrap())
        })
        .collect()
});

pub fn parse_shoe(url: &str, html: &str) -> Result<ShoeRecord, ScrapeError> {
    let doc = Html::parse_document(html);
    extract_shoe(doc.root_element(), url)
}

/// Runs every field heuristic against the tree rooted at `root`.
pub fn extract_shoe<N: Node>(root: N, url: &str) -> Result<ShoeRecord, ScrapeError> {
    Ok(ShoeRecord {
        url: url.to_string(),
        title: title(root),
        verdict: verdict(root),
        pros: bullet_list(root, "Pros"),
        cons: bullet_list(root, "Cons"),
        lab_results: lab_results(root),
        brand_specs: brand_specs(root),
        main_image: main_image(root, url)?,
    })
}

fn title<N: Node>(root: N) -> Option<String> {
    root.find_first("h1").map(|h1| h1.joined_text())
}

fn verdict<N: Node>(root: N) -> Option<String> {
    let Some(heading) = find_heading(root, &[2], "Our verdict") else {
        debug!("no verdict heading");
        return None;
    };

    let paragraphs: Vec<String> = section_after(heading, 2)
        .iter()
        .map(|el| el.spaced_text())
        .filter(|text| !text.is_empty())
        .collect();
    Some(paragraphs.join(" "))
}

/// Items of the list that follows the `h3` containing `label`.
fn bullet_list<N: Node>(root: N, label: &str) -> Vec<String> {
    find_heading(root, &[3], label)
        .and_then(|heading| heading.next_sibling_named("ul"))
        .map(|ul| {
            ul.find_all(&["li"])
                .iter()
                .map(|li| li.joined_text())
                .collect()
        })
        .unwrap_or_default()
}

fn lab_results<N: Node>(root: N) -> BTreeMap<String, String> {
    let mut lab = BTreeMap::new();
    let Some(heading) = find_heading(root, &[2, 3], "Lab test results") else {
        debug!("no lab test results section");
        return lab;
    };

    for el in section_before(heading, "h2") {
        if el.is("table") {
            for tr in el.find_all(&["tr"]) {
                let cells = tr.find_all(&["td", "th"]);
                if let [label, value, ..] = cells.as_slice() {
                    lab.insert(label.spaced_text(), value.spaced_text());
                }
            }
        } else {
            let text = el.spaced_text();
            for (field, re) in LAB_FIELD_RES.iter() {
                if !text.contains(*field) {
                    continue;
                }
                if let Some(value) = re.captures(&text).and_then(|caps| caps.get(1)) {
                    lab.insert(field.to_string(), value.as_str().to_string());
                }
            }
        }
    }
    lab
}

fn brand_specs<N: Node>(root: N) -> BTreeMap<String, String> {
    let mut specs = BTreeMap::new();
    let Some(heading) = find_heading(root, &[2, 3], "Specs (brand)")
        .or_else(|| find_heading(root, &[2, 3], "Specs"))
    else {
        debug!("no specs section");
        return specs;
    };

    for table in section_before(heading, "h2").into_iter().filter(|el| el.is("table")) {
        for tr in table.find_all(&["tr"]) {
            if let (Some(th), Some(td)) = (tr.find_first("th"), tr.find_first("td")) {
                specs.insert(th.spaced_text(), td.spaced_text());
            }
        }
    }
    specs
}

/// `src` of the second image carrying alt text. The first one is usually the
/// site logo; pages with fewer than two such images are rejected.
fn main_image<N: Node>(root: N, url: &str) -> Result<Option<String>, ScrapeError> {
    let with_alt: Vec<N> = root
        .find_all(&["img"])
        .into_iter()
        .filter(|img| img.attr("alt").is_some_and(|alt| !alt.is_empty()))
        .collect();

    let img = with_alt.get(1).ok_or_else(|| ScrapeError::MissingMainImage {
        url: url.to_string(),
        found: with_alt.len(),
    })?;
    Ok(img
        .attr("src")
        .filter(|src| !src.is_empty())
        .map(str::to_string))
}
