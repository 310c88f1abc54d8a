//! Stored (possibly partial or legacy) landing configurations.

use common::text;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[cfg(doc)]
use super::FeaturePreset;
use super::{
    Catalog, Fact, FeatureItem, LandingConfig, PlansBlock, Tag,
    MAX_AUTO_FEATURES, MAX_FACTS,
};

/// Number of legacy overview bullets turned into [`Tag`]s.
const LEGACY_TAGS: usize = 4;

/// Number of leading [`Fact`]s whose titles legacy overview bullets borrow
/// from the derived ones.
const LEGACY_TITLED_FACTS: usize = 6;

/// Title of a legacy overview bullet beyond [`LEGACY_TITLED_FACTS`].
const LEGACY_FACT_TITLE: &str = "Детали";

/// Landing configuration as it's stored by the admin interface.
///
/// Detected by shape: an object carrying a `blocks` field is
/// [`Stored::Legacy`], anything else is [`Stored::Canonical`]. Deserializing
/// never fails on malformed content: malformed fields are read as absent and
/// malformed list elements are skipped.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Stored {
    /// Legacy content blocks.
    Legacy(LegacyContent),

    /// Canonical (possibly partial) configuration.
    Canonical(LandingDraft),
}

impl<'de> Deserialize<'de> for Stored {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut value = Value::deserialize(deserializer)?;
        Ok(if let Some(blocks) = value.get_mut("blocks") {
            Self::Legacy(LegacyContent {
                blocks: items(blocks.take()),
            })
        } else {
            Self::Canonical(serde_json::from_value(value).unwrap_or_default())
        })
    }
}

impl From<LandingDraft> for Stored {
    fn from(draft: LandingDraft) -> Self {
        Self::Canonical(draft)
    }
}

impl From<LandingConfig> for Stored {
    fn from(config: LandingConfig) -> Self {
        Self::Canonical(config.into())
    }
}

/// Canonical landing configuration with every field optional.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct LandingDraft {
    /// Accent color of the page.
    #[serde(deserialize_with = "lenient")]
    pub accent_color: Option<String>,

    /// Surface (background) color of the page.
    #[serde(deserialize_with = "lenient")]
    pub surface_color: Option<String>,

    /// Hero image URL.
    #[serde(deserialize_with = "lenient")]
    pub hero_image: Option<String>,

    /// Label of the main call-to-action button.
    #[serde(deserialize_with = "lenient")]
    pub cta_label: Option<String>,

    /// Label of the floor-plan preview photo link.
    #[serde(deserialize_with = "lenient")]
    pub preview_photo_label: Option<String>,

    /// [`TagDraft`]s.
    #[serde(deserialize_with = "lenient_seq")]
    pub tags: Vec<TagDraft>,

    /// [`FactDraft`]s.
    #[serde(deserialize_with = "lenient_seq")]
    pub facts: Vec<FactDraft>,

    /// [`FeatureDraft`]s.
    #[serde(deserialize_with = "lenient_seq")]
    pub features: Vec<FeatureDraft>,

    /// [`PlansDraft`], if any.
    #[serde(deserialize_with = "lenient")]
    pub plans: Option<PlansDraft>,
}

impl From<LandingConfig> for LandingDraft {
    fn from(config: LandingConfig) -> Self {
        let LandingConfig {
            accent_color,
            surface_color,
            hero_image,
            cta_label,
            preview_photo_label,
            tags,
            facts,
            features,
            plans,
        } = config;

        Self {
            accent_color: Some(accent_color),
            surface_color: Some(surface_color),
            hero_image,
            cta_label,
            preview_photo_label,
            tags: tags.into_iter().map(Into::into).collect(),
            facts: facts.into_iter().map(Into::into).collect(),
            features: features.into_iter().map(Into::into).collect(),
            plans: Some(plans.into()),
        }
    }
}

/// Stored [`Tag`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct TagDraft {
    /// ID of the [`Tag`].
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,

    /// Text of the [`Tag`].
    #[serde(deserialize_with = "lenient")]
    pub label: Option<String>,
}

impl From<Tag> for TagDraft {
    fn from(Tag { id, label }: Tag) -> Self {
        Self {
            id: Some(id),
            label: Some(label),
        }
    }
}

/// Stored [`Fact`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct FactDraft {
    /// ID of the [`Fact`].
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,

    /// Title of the [`Fact`].
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,

    /// Value of the [`Fact`].
    #[serde(deserialize_with = "lenient")]
    pub value: Option<String>,

    /// Subtitle of the [`Fact`].
    #[serde(deserialize_with = "lenient")]
    pub subtitle: Option<String>,

    /// Background image URL of the [`Fact`].
    #[serde(deserialize_with = "lenient")]
    pub image: Option<String>,
}

impl From<Fact> for FactDraft {
    fn from(fact: Fact) -> Self {
        let Fact {
            id,
            title,
            value,
            subtitle,
            image,
        } = fact;
        Self {
            id: Some(id),
            title: Some(title),
            value: Some(value),
            subtitle,
            image,
        }
    }
}

/// Stored [`FeatureItem`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct FeatureDraft {
    /// ID of the [`FeatureItem`].
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,

    /// Title of the [`FeatureItem`].
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,

    /// Image URL of the [`FeatureItem`].
    #[serde(deserialize_with = "lenient")]
    pub image: Option<String>,

    /// Key of the [`FeaturePreset`] of the [`FeatureItem`].
    #[serde(deserialize_with = "lenient")]
    pub preset: Option<String>,
}

impl From<FeatureItem> for FeatureDraft {
    fn from(item: FeatureItem) -> Self {
        let FeatureItem {
            id,
            title,
            image,
            preset,
        } = item;
        Self {
            id: Some(id),
            title: Some(title),
            image,
            preset,
        }
    }
}

/// Stored [`PlansBlock`].
///
/// Stored floor-plan items are never read back, as they're always derived
/// from the current listings.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct PlansDraft {
    /// Title of the block.
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,

    /// Description of the block.
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,

    /// Call-to-action label of the block.
    #[serde(deserialize_with = "lenient")]
    pub cta_label: Option<String>,
}

impl From<PlansBlock> for PlansDraft {
    fn from(plans: PlansBlock) -> Self {
        Self {
            title: Some(plans.title),
            description: Some(plans.description),
            cta_label: Some(plans.cta_label),
        }
    }
}

/// Legacy landing content made of typed blocks.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct LegacyContent {
    /// [`LegacyBlock`]s in their display order.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub blocks: Vec<LegacyBlock>,
}

/// Block of a [`LegacyContent`].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LegacyBlock {
    /// Bullet list describing a complex.
    Overview {
        /// Bullet lines.
        #[serde(default, deserialize_with = "lenient_seq")]
        bullets: Vec<String>,
    },

    /// Image gallery.
    Gallery {
        /// Image URLs.
        #[serde(default, deserialize_with = "lenient_seq")]
        images: Vec<String>,
    },

    /// Call-to-action banner.
    Cta {
        /// Banner title.
        #[serde(default, deserialize_with = "lenient")]
        title: Option<String>,
    },

    /// Block kind having no canonical counterpart.
    #[serde(other)]
    Unsupported,
}

impl LegacyContent {
    /// Returns the bullets of the first overview block, if any.
    fn overview(&self) -> Option<&[String]> {
        self.blocks.iter().find_map(|b| match b {
            LegacyBlock::Overview { bullets } => Some(bullets.as_slice()),
            LegacyBlock::Gallery { .. }
            | LegacyBlock::Cta { .. }
            | LegacyBlock::Unsupported => None,
        })
    }

    /// Returns the images of the first gallery block, if any.
    fn gallery(&self) -> Option<&[String]> {
        self.blocks.iter().find_map(|b| match b {
            LegacyBlock::Gallery { images } => Some(images.as_slice()),
            LegacyBlock::Overview { .. }
            | LegacyBlock::Cta { .. }
            | LegacyBlock::Unsupported => None,
        })
    }

    /// Returns the title of the first call-to-action block, if any.
    fn cta(&self) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            LegacyBlock::Cta { title } => title.as_deref(),
            LegacyBlock::Overview { .. }
            | LegacyBlock::Gallery { .. }
            | LegacyBlock::Unsupported => None,
        })
    }

    /// Migrates this [`LegacyContent`] into a [`LandingDraft`].
    ///
    /// Fields the legacy blocks carry nothing for are left empty, so they're
    /// filled from the `derived` [`LandingConfig`] later.
    #[must_use]
    pub fn migrate(
        &self,
        catalog: &Catalog,
        derived: &LandingConfig,
    ) -> LandingDraft {
        let bullets = self
            .overview()
            .unwrap_or_default()
            .iter()
            .filter_map(|b| text::sanitize(b))
            .collect::<Vec<_>>();

        let tags = bullets
            .iter()
            .take(LEGACY_TAGS)
            .map(|label| TagDraft {
                id: None,
                label: Some(label.clone()),
            })
            .collect();

        let facts = bullets
            .iter()
            .take(MAX_FACTS)
            .enumerate()
            .map(|(i, value)| {
                let title = derived
                    .facts
                    .get(i)
                    .filter(|_| i < LEGACY_TITLED_FACTS)
                    .map_or(LEGACY_FACT_TITLE, |f| f.title.as_str());
                FactDraft {
                    title: Some(title.to_owned()),
                    value: Some(value.clone()),
                    ..FactDraft::default()
                }
            })
            .collect();

        let features = self
            .gallery()
            .unwrap_or_default()
            .iter()
            .filter_map(|i| text::sanitize(i))
            .take(MAX_AUTO_FEATURES)
            .enumerate()
            .map(|(i, image)| {
                let preset = catalog.features.get(i);
                let title = preset.map(|p| p.title.clone()).or_else(|| {
                    let rest = i - catalog.features.len();
                    catalog
                        .default_features
                        .get(rest.checked_rem(catalog.default_features.len())?)
                        .cloned()
                });
                FeatureDraft {
                    id: None,
                    title,
                    image: Some(image),
                    preset: preset.map(|p| p.key.clone()),
                }
            })
            .collect();

        LandingDraft {
            cta_label: text::sanitize_opt(self.cta()),
            tags,
            facts,
            features,
            ..LandingDraft::default()
        }
    }
}

/// Deserializes a `T`, reading a malformed one as its default.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Deserializes a list of `T`s, skipping its malformed elements.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Value::deserialize(deserializer).map(items)
}

/// Reads the well-formed `T` elements of the provided list, if it's one.
fn items<T: DeserializeOwned>(value: Value) -> Vec<T> {
    let Value::Array(elements) = value else {
        return Vec::new();
    };
    elements
        .into_iter()
        .filter_map(|e| serde_json::from_value(e).ok())
        .collect()
}

#[cfg(test)]
mod spec {
    use super::{LandingDraft, LegacyBlock, LegacyContent, Stored};

    #[test]
    fn detects_legacy_shape() {
        let stored: Stored = serde_json::from_str(
            r#"{
                "blocks": [
                    {"type": "hero", "image": "/img/hero.jpg"},
                    {"type": "overview", "bullets": ["Бизнес-класс", "Сдача 2026"]},
                    {"type": "cta", "title": "Записаться на показ"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            stored,
            Stored::Legacy(LegacyContent {
                blocks: vec![
                    LegacyBlock::Unsupported,
                    LegacyBlock::Overview {
                        bullets: vec!["Бизнес-класс".into(), "Сдача 2026".into()],
                    },
                    LegacyBlock::Cta {
                        title: Some("Записаться на показ".into()),
                    },
                ],
            }),
        );
    }

    #[test]
    fn detects_canonical_shape() {
        let stored: Stored = serde_json::from_str(
            r##"{
                "accent_color": "#000000",
                "tags": [{"label": "Бизнес"}],
                "plans": {"title": "Квартиры", "items": [{"price": "1 ₽"}]}
            }"##,
        )
        .unwrap();

        let Stored::Canonical(draft) = &stored else {
            panic!("expected canonical shape, got: {stored:?}");
        };
        assert_eq!(draft.accent_color.as_deref(), Some("#000000"));
        assert_eq!(draft.tags[0].label.as_deref(), Some("Бизнес"));
        assert_eq!(
            draft.plans.as_ref().and_then(|p| p.title.as_deref()),
            Some("Квартиры"),
        );
    }

    #[test]
    fn skips_malformed_legacy_entries() {
        let stored: Stored = serde_json::from_str(
            r#"{
                "blocks": [
                    {"type": "overview", "bullets": ["Бизнес-класс", null, 5]},
                    {"bullets": ["Без типа"]},
                    {"type": "gallery", "images": "/img/one.jpg"},
                    {"type": "cta", "title": "Позвонить"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            stored,
            Stored::Legacy(LegacyContent {
                blocks: vec![
                    LegacyBlock::Overview {
                        bullets: vec!["Бизнес-класс".into()],
                    },
                    LegacyBlock::Gallery { images: vec![] },
                    LegacyBlock::Cta {
                        title: Some("Позвонить".into()),
                    },
                ],
            }),
        );
    }

    #[test]
    fn detects_legacy_shape_by_blocks_field() {
        let stored: Stored =
            serde_json::from_str(r#"{"blocks": null, "tags": []}"#).unwrap();

        assert_eq!(stored, Stored::Legacy(LegacyContent { blocks: vec![] }));
    }

    #[test]
    fn reads_malformed_canonical_fields_as_absent() {
        let stored: Stored = serde_json::from_str(
            r#"{
                "cta_label": ["Позвонить"],
                "tags": [{"label": 5, "id": "tag-1"}, "Бизнес", {"label": "Парк"}],
                "facts": {"title": "Не список"},
                "plans": 7
            }"#,
        )
        .unwrap();

        let Stored::Canonical(draft) = &stored else {
            panic!("expected canonical shape, got: {stored:?}");
        };
        assert_eq!(draft.cta_label, None);
        let tags = draft
            .tags
            .iter()
            .map(|t| (t.id.as_deref(), t.label.as_deref()))
            .collect::<Vec<_>>();
        assert_eq!(tags, [(Some("tag-1"), None), (None, Some("Парк"))]);
        assert!(draft.facts.is_empty());
        assert_eq!(draft.plans, None);
    }

    #[test]
    fn reads_non_object_as_empty_draft() {
        for json in ["null", "42", r#""текст""#, "[]"] {
            let stored: Stored = serde_json::from_str(json).unwrap();

            assert_eq!(
                stored,
                Stored::Canonical(LandingDraft::default()),
                "json: {json}",
            );
        }
    }
}
