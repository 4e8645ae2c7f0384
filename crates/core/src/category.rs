//! Article categories: templates, SEO defaults, built-in seed data and
//! keyword-based category inference for imported articles.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

pub const TOD: &str = "tod";
pub const HOCHZEIT: &str = "hochzeit";
pub const BREAKING_NEWS: &str = "breaking-news";
pub const GASTBEITRAG: &str = "gastbeitrag";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub template_structure: TemplateStructure,
    pub seo_defaults: Option<SeoDefaults>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Section layout an article of this category is expected to follow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TemplateStructure {
    pub sections: Vec<TemplateSection>,
    #[serde(default)]
    pub title_template: String,
    #[serde(default)]
    pub slug_template: String,
    #[serde(default)]
    pub nlp_terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TemplateSection {
    Intro {
        title: Option<String>,
        word_count: String,
        #[serde(default)]
        requirements: Vec<String>,
    },
    Section {
        title: Option<String>,
        word_count: String,
        #[serde(default)]
        requirements: Vec<String>,
    },
    Flexible {
        min_sections: u32,
        max_sections: u32,
    },
}

impl TemplateSection {
    /// Parses the `"150-200"` word-count range; `None` for flexible sections.
    pub fn word_range(&self) -> Option<(u32, u32)> {
        match self {
            TemplateSection::Intro { word_count, .. } | TemplateSection::Section { word_count, .. } => {
                let (low, high) = word_count.split_once('-')?;
                Some((low.trim().parse().ok()?, high.trim().parse().ok()?))
            }
            TemplateSection::Flexible { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoDefaults {
    pub meta_title_template: String,
    pub meta_description_template: String,
    pub schema_type: Vec<String>,
}

/// Infers a category slug for an imported article.
///
/// The original URL is consulted first, then the article text. Anything that
/// matches no rule is breaking news.
pub fn detect_category(url: &str, text: &str) -> &'static str {
    let url = url.to_lowercase();
    let text = text.to_lowercase();

    if ["tod", "verstorben", "nachruf"].iter().any(|k| url.contains(k)) {
        return TOD;
    }
    if ["hochzeit", "heirat"].iter().any(|k| url.contains(k)) {
        return HOCHZEIT;
    }
    if ["gastbeitrag", "guest"].iter().any(|k| url.contains(k)) {
        return GASTBEITRAG;
    }

    if (text.contains("tod") || text.contains("verstorben")) && (text.contains("todesursache") || text.contains("nachruf")) {
        return TOD;
    }
    if text.contains("hochzeit") || (text.contains("heirat") && text.contains("braut")) {
        return HOCHZEIT;
    }

    BREAKING_NEWS
}

fn section(title: &str, word_count: &str, requirements: &[&str]) -> TemplateSection {
    TemplateSection::Section {
        title: Some(title.to_string()),
        word_count: word_count.to_string(),
        requirements: strings(requirements),
    }
}

fn intro(word_count: &str, requirements: &[&str]) -> TemplateSection {
    TemplateSection::Intro { title: None, word_count: word_count.to_string(), requirements: strings(requirements) }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn category(name: &str, slug: &str, description: &str, template: TemplateStructure, seo: SeoDefaults) -> Category {
    let now = OffsetDateTime::now_utc();
    Category {
        id: Uuid::new_v4(),
        name: name.to_string(),
        slug: slug.to_string(),
        description: Some(description.to_string()),
        template_structure: template,
        seo_defaults: Some(seo),
        created_at: now,
        updated_at: now,
    }
}

/// The four built-in categories, with `year` substituted into the templates.
pub fn default_categories(year: i32) -> Vec<Category> {
    vec![
        category(
            "Tod/Nachruf",
            TOD,
            "Breaking news about celebrity deaths",
            TemplateStructure {
                sections: vec![
                    intro("150-200", &["exact_keyword", "trending_context", "hook"]),
                    section("Todesursache von {name}", "200-250", &["cause", "date", "location"]),
                    section("{name} Familie: Partner und Kinder", "150-200", &["spouse", "children", "family_background"]),
                    section("Karriere und Vermächtnis von {name}", "200-250", &["career_highlights", "impact", "legacy"]),
                ],
                title_template: "{name} Tod: {age}-Jähriger {profession} Verstorben".to_string(),
                slug_template: format!("{{name}}-tod-ursache-{year}"),
                nlp_terms: strings(&["verstorben", "Todesursache", "Vermächtnis", "Karriere", "Familie", "Nachruf"]),
            },
            SeoDefaults {
                meta_title_template: format!("{{name}} Tod: Ursache, Familie & Vermächtnis {year}"),
                meta_description_template:
                    "{name} ist verstorben. Alles über die Todesursache, Familie und das Vermächtnis. Aktuelle Details hier."
                        .to_string(),
                schema_type: strings(&["NewsArticle", "Person"]),
            },
        ),
        category(
            "Hochzeit",
            HOCHZEIT,
            "Celebrity wedding news",
            TemplateStructure {
                sections: vec![
                    intro("150-200", &["couple_names", "wedding_date", "location"]),
                    section("Die Hochzeit von {name1} und {name2}", "200-250", &["ceremony_details", "venue", "guests"]),
                    section("Liebesgeschichte: Wie sie sich kennenlernten", "150-200", &["how_they_met", "relationship_timeline"]),
                    section("Was wir über die Zukunft wissen", "150-200", &["future_plans", "quotes"]),
                ],
                title_template: "{name1} und {name2} Hochzeit: Alle Details zur Traumhochzeit".to_string(),
                slug_template: format!("{{name1}}-{{name2}}-hochzeit-{year}"),
                nlp_terms: strings(&["Hochzeit", "Trauung", "Braut", "Bräutigam", "Ehepaar", "Liebesgeschichte"]),
            },
            SeoDefaults {
                meta_title_template: format!("{{name1}} & {{name2}} Hochzeit: Datum, Ort & alle Details {year}"),
                meta_description_template: "{name1} und {name2} haben geheiratet! Alle Infos zur Hochzeit, Location und Gäste."
                    .to_string(),
                schema_type: strings(&["NewsArticle", "Event"]),
            },
        ),
        category(
            "Breaking News",
            BREAKING_NEWS,
            "General breaking news and updates",
            TemplateStructure {
                sections: vec![
                    intro("150-200", &["what_happened", "when", "where", "who"]),
                    section("Was ist passiert?", "200-300", &["detailed_account", "timeline"]),
                    section("Reaktionen und Stellungnahmen", "150-200", &["official_statements", "public_reaction"]),
                    section("Aktuelle Entwicklungen", "100-150", &["updates", "what_next"]),
                ],
                title_template: "{headline}: {subheadline}".to_string(),
                slug_template: format!("{{topic}}-{year}"),
                nlp_terms: strings(&["aktuell", "breaking", "Eilmeldung", "Update", "Entwicklung"]),
            },
            SeoDefaults {
                meta_title_template: format!("{{headline}} - Aktuelle News {year}"),
                meta_description_template: "{summary} Alle aktuellen Informationen und Updates hier.".to_string(),
                schema_type: strings(&["NewsArticle"]),
            },
        ),
        category(
            "Gastbeitrag",
            GASTBEITRAG,
            "Guest posts from agencies",
            TemplateStructure {
                sections: vec![TemplateSection::Flexible { min_sections: 3, max_sections: 10 }],
                title_template: "{custom}".to_string(),
                slug_template: "{custom}".to_string(),
                nlp_terms: Vec::new(),
            },
            SeoDefaults {
                meta_title_template: "{custom}".to_string(),
                meta_description_template: "{custom}".to_string(),
                schema_type: strings(&["Article"]),
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://ghanainsider.com/de/index.php/star-verstorben/", "", TOD)]
    #[case("https://ghanainsider.com/de/nachruf-fuer-x/", "", TOD)]
    #[case("https://ghanainsider.com/de/hochzeit-von-a-und-b/", "", HOCHZEIT)]
    #[case("https://ghanainsider.com/de/guest-story/", "", GASTBEITRAG)]
    #[case("https://ghanainsider.com/de/x/", "Er ist verstorben, die Todesursache ist unklar.", TOD)]
    #[case("https://ghanainsider.com/de/x/", "Sein Tod kam plötzlich.", BREAKING_NEWS)]
    #[case("https://ghanainsider.com/de/x/", "Die Hochzeit fand im Mai statt.", HOCHZEIT)]
    #[case("https://ghanainsider.com/de/x/", "Die Braut sagte ja, die Heirat war schön.", HOCHZEIT)]
    #[case("https://ghanainsider.com/de/x/", "Die Heirat wurde verschoben.", BREAKING_NEWS)]
    #[case("https://ghanainsider.com/de/x/", "Neue Regierung gebildet.", BREAKING_NEWS)]
    fn test_detect_category(#[case] url: &str, #[case] text: &str, #[case] expected: &str) {
        assert_eq!(detect_category(url, text), expected);
    }

    #[test]
    fn test_url_rules_win_over_text() {
        assert_eq!(detect_category("https://ghanainsider.com/de/heirat/", "Todesursache und Nachruf"), HOCHZEIT);
    }

    #[test]
    fn test_default_categories() {
        let categories = default_categories(2025);
        let slugs: Vec<_> = categories.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, [TOD, HOCHZEIT, BREAKING_NEWS, GASTBEITRAG]);

        let tod = &categories[0];
        assert_eq!(tod.template_structure.slug_template, "{name}-tod-ursache-2025");
        assert_eq!(tod.template_structure.sections[1].word_range(), Some((200, 250)));
        assert_eq!(categories[3].template_structure.sections[0].word_range(), None);
    }

    #[test]
    fn test_sections_serialize_with_type_tag() {
        let json = serde_json::to_value(TemplateSection::Flexible { min_sections: 3, max_sections: 10 }).unwrap();
        assert_eq!(json["type"], "flexible");
        assert_eq!(json["min_sections"], 3);

        let intro: TemplateSection =
            serde_json::from_str(r#"{"type":"intro","title":null,"word_count":"150-200","requirements":["hook"]}"#).unwrap();
        assert_eq!(intro.word_range(), Some((150, 200)));
    }
}
