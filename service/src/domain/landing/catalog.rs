//! [`Catalog`] of the landing presets.

use common::text;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::geo::Point;

use super::stored::FeatureDraft;
#[cfg(doc)]
use super::{Fact, FeatureItem, LandingConfig};

/// Canonical feature ticker entry.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FeaturePreset {
    /// Unique key of this [`FeaturePreset`].
    pub key: String,

    /// Title of this [`FeaturePreset`].
    pub title: String,

    /// Image URL of this [`FeaturePreset`].
    pub image: String,
}

impl FeaturePreset {
    /// Creates a new [`FeaturePreset`].
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            image: image.into(),
        }
    }
}

/// Rule inferring a feature title from a free-text description.
#[derive(Clone, Debug)]
pub struct Keyword {
    /// Pattern to look for in a description.
    pub pattern: Regex,

    /// Feature title implied by the [`Keyword::pattern`] match.
    pub title: String,
}

/// Reference point the distance [`Fact`] is measured to.
#[derive(Clone, Debug)]
pub struct Landmark {
    /// Title of the distance [`Fact`].
    pub title: String,

    /// Location of this [`Landmark`].
    pub point: Point,
}

/// Default texts and colors of a [`LandingConfig`].
#[derive(Clone, Debug)]
pub struct Labels {
    /// Default accent color.
    pub accent_color: String,

    /// Default surface color.
    pub surface_color: String,

    /// Default label of the main call-to-action button.
    pub cta: String,

    /// Default label of the floor-plan preview photo link.
    pub preview_photo: String,

    /// Default title of the floor-plan block.
    pub plans_title: String,

    /// Default description of the floor-plan block.
    pub plans_description: String,

    /// Default call-to-action label of the floor-plan block.
    pub plans_cta: String,
}

/// Versionable tables driving the landing synthesis.
///
/// Immutable once created, so a single [`Catalog`] may be shared by any
/// number of concurrent requests.
#[derive(Clone, Debug)]
pub struct Catalog {
    /// Known [`FeaturePreset`]s.
    pub features: Vec<FeaturePreset>,

    /// Background images rotated over the [`Fact`]s.
    pub fact_images: Vec<String>,

    /// Ordered description [`Keyword`]s.
    pub keywords: Vec<Keyword>,

    /// Feature titles appended to every derived feature ticker.
    pub default_features: Vec<String>,

    /// Pattern detecting underground parking in a description.
    pub parking: Regex,

    /// Pattern detecting floor-plan images by their URL.
    pub plan_image: Regex,

    /// [`Landmark`] the distance [`Fact`] is measured to.
    pub landmark: Landmark,

    /// Default [`Labels`].
    pub labels: Labels,
}

impl Default for Catalog {
    fn default() -> Self {
        let preset = |key: &str, title: &str| {
            FeaturePreset::new(
                key,
                title,
                format!("/static/landing/features/{key}.jpg"),
            )
        };
        let keyword = |pattern: &str, title: &str| Keyword {
            pattern: Regex::new(pattern).expect("valid regex"),
            title: title.to_owned(),
        };

        Self {
            features: vec![
                preset("park", "Парк рядом"),
                preset("parking", "Подземный паркинг"),
                preset("security", "Охраняемая территория"),
                preset("yard", "Двор без машин"),
                preset("playground", "Детские площадки"),
                preset("fitness", "Фитнес-центр"),
                preset("school", "Школа и детский сад"),
                preset("lobby", "Дизайнерские лобби"),
                preset("view", "Панорамные виды"),
                preset("embankment", "Набережная"),
                preset("concierge", "Консьерж-сервис"),
                preset("retail", "Магазины и кафе"),
                preset("smart", "Умный дом"),
                preset("metro", "Рядом с метро"),
            ],
            fact_images: (1..=6)
                .map(|n| format!("/static/landing/facts/{n}.jpg"))
                .collect(),
            keywords: vec![
                keyword(r"(?i)\bпарк(а|е|ом|и|ов)?\b|\bсквер", "Парк рядом"),
                keyword(r"(?i)паркинг|парковк", "Подземный паркинг"),
                keyword(r"(?i)охран|видеонаблюден|закрыт\w* территори", "Охраняемая территория"),
                keyword(r"(?i)двор\w* без машин", "Двор без машин"),
                keyword(r"(?i)детск\w* площадк", "Детские площадки"),
                keyword(r"(?i)фитнес|спортзал|бассейн|spa\b", "Фитнес-центр"),
                keyword(r"(?i)школ|детск\w* сад", "Школа и детский сад"),
                keyword(r"(?i)лобби", "Дизайнерские лобби"),
                keyword(r"(?i)панорамн|видов\w* окн|вид на", "Панорамные виды"),
                keyword(r"(?i)набережн", "Набережная"),
                keyword(r"(?i)консьерж", "Консьерж-сервис"),
                keyword(r"(?i)магазин|кафе|ресторан|ритейл", "Магазины и кафе"),
                keyword(r"(?i)умн\w* дом|smart", "Умный дом"),
                keyword(r"(?i)\bметро\b", "Рядом с метро"),
            ],
            default_features: vec![
                "Охраняемая территория".to_owned(),
                "Двор без машин".to_owned(),
                "Детские площадки".to_owned(),
                "Магазины и кафе".to_owned(),
            ],
            parking: Regex::new(
                r"(?i)подземн\w* (паркинг|парковк)|паркинг|машино-?мест",
            )
            .expect("valid regex"),
            plan_image: Regex::new(r"(?i)plan|layout|preset|floor|планир")
                .expect("valid regex"),
            landmark: Landmark {
                title: "До Красной площади".to_owned(),
                point: Point {
                    lat: 55.753_930,
                    lon: 37.620_795,
                },
            },
            labels: Labels {
                accent_color: "#B08D57".to_owned(),
                surface_color: "#F6F3EE".to_owned(),
                cta: "Оставить заявку".to_owned(),
                preview_photo: "Смотреть планировку".to_owned(),
                plans_title: "Планировки".to_owned(),
                plans_description: "Актуальные цены и планировки квартир \
                                    в продаже"
                    .to_owned(),
                plans_cta: "Подобрать квартиру".to_owned(),
            },
        }
    }
}

impl Catalog {
    /// Looks up a [`FeaturePreset`] by its key.
    #[must_use]
    pub fn preset_by_key(&self, key: &str) -> Option<&FeaturePreset> {
        self.features.iter().find(|p| p.key == key)
    }

    /// Looks up a [`FeaturePreset`] by its title, ignoring case.
    #[must_use]
    pub fn preset_by_title(&self, title: &str) -> Option<&FeaturePreset> {
        self.features
            .iter()
            .find(|p| text::eq_ignore_case(&p.title, title))
    }

    /// Looks up a [`FeaturePreset`] by its exact image URL.
    #[must_use]
    pub fn preset_by_image(&self, image: &str) -> Option<&FeaturePreset> {
        self.features.iter().find(|p| p.image == image)
    }

    /// Returns the background image of the [`Fact`] at the provided
    /// `position`, rotating over [`Catalog::fact_images`].
    #[must_use]
    pub fn fact_image(&self, position: usize) -> Option<String> {
        self.fact_images
            .get(position.checked_rem(self.fact_images.len())?)
            .cloned()
    }

    /// Infers the [`FeaturePreset`] key of the provided feature.
    ///
    /// Resolution order:
    /// 1. the stored key, if it names a known [`FeaturePreset`];
    /// 2. the title, if it matches a [`FeaturePreset`] title ignoring case;
    /// 3. the image, if it's exactly a [`FeaturePreset`] image;
    /// 4. the stored key as is, even if unknown.
    #[must_use]
    pub fn infer_preset_key(&self, feature: &FeatureDraft) -> Option<String> {
        let stored = text::sanitize_opt(feature.preset.as_deref());

        stored
            .as_deref()
            .and_then(|key| self.preset_by_key(key))
            .or_else(|| {
                text::sanitize_opt(feature.title.as_deref())
                    .and_then(|title| self.preset_by_title(&title))
            })
            .or_else(|| {
                text::sanitize_opt(feature.image.as_deref())
                    .and_then(|image| self.preset_by_image(&image))
            })
            .map(|preset| preset.key.clone())
            .or(stored)
    }
}
