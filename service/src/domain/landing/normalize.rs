//! Merging of a [`Stored`] landing configuration with the derived one.

use common::text;

use crate::domain::catalog::{Complex, Listing};

use super::{
    derive_id, format,
    stored::{FactDraft, FeatureDraft, TagDraft},
    Catalog, Fact, FeatureItem, LandingConfig, LandingDraft, PlansBlock,
    Stored, Tag, MAX_FACTS, MAX_FEATURES,
};

/// Title of a [`Fact`] stored without one.
const FACT_TITLE: &str = "Детали";

/// Title of a [`FeatureItem`] stored without one and having no preset.
const FEATURE_TITLE: &str = "Особенность";

/// Label of a [`Tag`] stored without one.
const TAG_LABEL: &str = "Метка";

impl Catalog {
    /// Normalizes the provided [`Stored`] landing configuration into a
    /// canonical [`LandingConfig`] of the provided [`Complex`].
    ///
    /// Anything missing in the [`Stored`] configuration is taken from the
    /// [`Catalog::build_auto()`] result, while floor-plan items are always
    /// derived from the current [`Listing`]s.
    ///
    /// Idempotent: normalizing a result of this method again doesn't change
    /// it.
    #[must_use]
    pub fn normalize(
        &self,
        stored: Option<&Stored>,
        complex: &Complex,
        listings: &[Listing],
    ) -> LandingConfig {
        let auto = self.build_auto(complex, listings);
        match stored {
            None => auto,
            Some(Stored::Legacy(legacy)) => {
                let draft = legacy.migrate(self, &auto);
                self.merge(&draft, auto)
            }
            Some(Stored::Canonical(draft)) => self.merge(draft, auto),
        }
    }

    /// Merges the provided [`LandingDraft`] over the `auto` derived
    /// [`LandingConfig`].
    fn merge(&self, draft: &LandingDraft, auto: LandingConfig) -> LandingConfig {
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
        } = auto;
        let stored_plans = draft.plans.clone().unwrap_or_default();

        LandingConfig {
            accent_color: text::sanitize_opt(draft.accent_color.as_deref())
                .unwrap_or(accent_color),
            surface_color: text::sanitize_opt(draft.surface_color.as_deref())
                .unwrap_or(surface_color),
            hero_image: text::sanitize_opt(draft.hero_image.as_deref())
                .or(hero_image),
            cta_label: text::sanitize_opt(draft.cta_label.as_deref())
                .or(cta_label),
            preview_photo_label: text::sanitize_opt(
                draft.preview_photo_label.as_deref(),
            )
            .or(preview_photo_label),
            tags: non_empty(merge_tags(&draft.tags)).unwrap_or(tags),
            facts: non_empty(self.merge_facts(&draft.facts)).unwrap_or(facts),
            features: non_empty(self.merge_features(&draft.features))
                .unwrap_or(features),
            plans: PlansBlock {
                title: text::sanitize_opt(stored_plans.title.as_deref())
                    .unwrap_or(plans.title),
                description: text::sanitize_opt(
                    stored_plans.description.as_deref(),
                )
                .unwrap_or(plans.description),
                cta_label: text::sanitize_opt(stored_plans.cta_label.as_deref())
                    .unwrap_or(plans.cta_label),
                items: plans.items,
            },
        }
    }

    /// Back-fills the provided [`FactDraft`]s with placeholders.
    fn merge_facts(&self, drafts: &[FactDraft]) -> Vec<Fact> {
        drafts
            .iter()
            .take(MAX_FACTS)
            .enumerate()
            .map(|(i, d)| {
                let title = text::sanitize_opt(d.title.as_deref())
                    .unwrap_or_else(|| FACT_TITLE.to_owned());
                Fact {
                    id: text::sanitize_opt(d.id.as_deref())
                        .unwrap_or_else(|| derive_id("fact", i, &title)),
                    value: text::sanitize_opt(d.value.as_deref())
                        .unwrap_or_else(|| format::ON_REQUEST.to_owned()),
                    subtitle: text::sanitize_opt(d.subtitle.as_deref()),
                    image: text::sanitize_opt(d.image.as_deref())
                        .or_else(|| self.fact_image(i)),
                    title,
                }
            })
            .collect()
    }

    /// Back-fills the provided [`FeatureDraft`]s from the matching
    /// [`FeaturePreset`]s, or with placeholders if there are none.
    ///
    /// [`FeaturePreset`]: super::FeaturePreset
    fn merge_features(&self, drafts: &[FeatureDraft]) -> Vec<FeatureItem> {
        drafts
            .iter()
            .take(MAX_FEATURES)
            .enumerate()
            .map(|(i, d)| {
                let key = self.infer_preset_key(d);
                let preset = key.as_deref().and_then(|k| self.preset_by_key(k));
                let title = text::sanitize_opt(d.title.as_deref())
                    .or_else(|| preset.map(|p| p.title.clone()))
                    .unwrap_or_else(|| FEATURE_TITLE.to_owned());
                FeatureItem {
                    id: text::sanitize_opt(d.id.as_deref())
                        .unwrap_or_else(|| derive_id("feature", i, &title)),
                    image: text::sanitize_opt(d.image.as_deref())
                        .or_else(|| preset.map(|p| p.image.clone())),
                    title,
                    preset: key,
                }
            })
            .collect()
    }
}

/// Back-fills the provided [`TagDraft`]s with placeholders.
fn merge_tags(drafts: &[TagDraft]) -> Vec<Tag> {
    drafts
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let label = text::sanitize_opt(d.label.as_deref())
                .unwrap_or_else(|| TAG_LABEL.to_owned());
            Tag {
                id: text::sanitize_opt(d.id.as_deref())
                    .unwrap_or_else(|| derive_id("tag", i, &label)),
                label,
            }
        })
        .collect()
}

/// Returns the provided items, unless there are none.
fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

#[cfg(test)]
mod spec {
    use crate::domain::{
        catalog::Listing,
        landing::{
            fixture,
            stored::{
                FactDraft, FeatureDraft, LegacyBlock, LegacyContent, TagDraft,
            },
            Catalog, LandingConfig, LandingDraft, Stored, MAX_FACTS,
            MAX_FEATURES,
        },
    };

    fn renormalize(config: &LandingConfig) -> LandingConfig {
        let stored = Stored::from(config.clone());
        Catalog::default().normalize(
            Some(&stored),
            &fixture::complex(),
            &listings(),
        )
    }

    fn listings() -> Vec<Listing> {
        vec![
            fixture::listing("l-1", Some(0), Some(5_000_000.0)),
            fixture::listing("l-2", Some(1), Some(6_000_000.0)),
            fixture::listing("l-3", Some(1), Some(7_000_000.0)),
        ]
    }

    fn legacy() -> Stored {
        Stored::Legacy(LegacyContent {
            blocks: vec![
                LegacyBlock::Unsupported,
                LegacyBlock::Overview {
                    bullets: (1..=8).map(|n| format!("Пункт {n}")).collect(),
                },
                LegacyBlock::Gallery {
                    images: vec!["/img/g1.jpg".into(), " ".into(), "/img/g2.jpg".into()],
                },
                LegacyBlock::Cta {
                    title: Some(" Записаться на показ ".into()),
                },
            ],
        })
    }

    #[test]
    fn returns_auto_config_when_nothing_stored() {
        let catalog = Catalog::default();
        let complex = fixture::complex();

        assert_eq!(
            catalog.normalize(None, &complex, &listings()),
            catalog.build_auto(&complex, &listings()),
        );
    }

    #[test]
    fn migrates_legacy_blocks() {
        let catalog = Catalog::default();
        let complex = fixture::complex();
        let auto = catalog.build_auto(&complex, &listings());

        let config = catalog.normalize(Some(&legacy()), &complex, &listings());

        let tags = config.tags.iter().map(|t| t.label.as_str()).collect::<Vec<_>>();
        assert_eq!(tags, ["Пункт 1", "Пункт 2", "Пункт 3", "Пункт 4"]);

        let facts = config
            .facts
            .iter()
            .map(|f| (f.title.as_str(), f.value.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(facts.len(), 8);
        assert_eq!(facts[0], (auto.facts[0].title.as_str(), "Пункт 1"));
        assert_eq!(facts[5], (auto.facts[5].title.as_str(), "Пункт 6"));
        assert_eq!(facts[6], ("Детали", "Пункт 7"));
        assert!(config.facts.iter().all(|f| f.image.is_some()));

        let features = config
            .features
            .iter()
            .map(|f| (f.title.as_str(), f.image.as_deref(), f.preset.as_deref()))
            .collect::<Vec<_>>();
        assert_eq!(
            features,
            [
                ("Парк рядом", Some("/img/g1.jpg"), Some("park")),
                ("Подземный паркинг", Some("/img/g2.jpg"), Some("parking")),
            ],
        );

        assert_eq!(config.cta_label.as_deref(), Some("Записаться на показ"));
        assert_eq!(config.accent_color, auto.accent_color);
        assert_eq!(config.plans, auto.plans);
    }

    #[test]
    fn migrates_legacy_blocks_despite_malformed_bullets() {
        let stored: Stored = serde_json::from_str(
            r#"{
                "blocks": [
                    {"type": "overview", "bullets": ["Бизнес-класс", null]},
                    {"type": "cta", "title": "Позвонить"}
                ]
            }"#,
        )
        .unwrap();

        let config = Catalog::default().normalize(
            Some(&stored),
            &fixture::complex(),
            &listings(),
        );

        assert_eq!(config.cta_label.as_deref(), Some("Позвонить"));
        let tags = config.tags.iter().map(|t| t.label.as_str()).collect::<Vec<_>>();
        assert_eq!(tags, ["Бизнес-класс"]);
        assert_eq!(config.facts.len(), 1);
        assert_eq!(config.facts[0].value, "Бизнес-класс");
    }

    #[test]
    fn falls_back_to_defaults_once_presets_run_short() {
        let mut catalog = Catalog::default();
        catalog.features.truncate(1);
        let stored = Stored::Legacy(LegacyContent {
            blocks: vec![LegacyBlock::Gallery {
                images: (1..=3).map(|n| format!("/img/{n}.jpg")).collect(),
            }],
        });

        let config =
            catalog.normalize(Some(&stored), &fixture::complex(), &[]);

        let titles = config.features.iter().map(|f| f.title.as_str()).collect::<Vec<_>>();
        assert_eq!(titles, ["Парк рядом", "Охраняемая территория", "Двор без машин"]);
    }

    #[test]
    fn merges_canonical_config() {
        let stored = Stored::Canonical(LandingDraft {
            accent_color: Some("  ".into()),
            surface_color: Some("#FFFFFF".into()),
            tags: vec![
                TagDraft {
                    id: None,
                    label: Some(" ".into()),
                },
                TagDraft {
                    id: Some("tag-own".into()),
                    label: Some("Своя метка".into()),
                },
            ],
            facts: vec![
                FactDraft {
                    value: Some("100 м".into()),
                    ..FactDraft::default()
                },
                FactDraft::default(),
            ],
            features: vec![FeatureDraft {
                title: Some("подземный паркинг".into()),
                ..FeatureDraft::default()
            }],
            ..LandingDraft::default()
        });
        let catalog = Catalog::default();
        let auto = catalog.build_auto(&fixture::complex(), &listings());

        let config =
            catalog.normalize(Some(&stored), &fixture::complex(), &listings());

        assert_eq!(config.accent_color, auto.accent_color);
        assert_eq!(config.surface_color, "#FFFFFF");
        assert_eq!(config.hero_image, auto.hero_image);
        let tags = config
            .tags
            .iter()
            .map(|t| (t.id.as_str(), t.label.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(tags[1], ("tag-own", "Своя метка"));
        assert_eq!(tags[0].1, "Метка");
        let facts = config
            .facts
            .iter()
            .map(|f| (f.title.as_str(), f.value.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(facts, [("Детали", "100 м"), ("Детали", "По запросу")]);
        assert_eq!(config.facts[0].image, catalog.fact_image(0));
        assert_eq!(config.facts[1].image, catalog.fact_image(1));
        assert_eq!(config.features.len(), 1);
        assert_eq!(config.features[0].title, "подземный паркинг");
        assert_eq!(config.features[0].preset.as_deref(), Some("parking"));
        assert_eq!(
            config.features[0].image.as_deref(),
            Some("/static/landing/features/parking.jpg"),
        );
        assert_eq!(config.plans, auto.plans);
    }

    #[test]
    fn keeps_sparse_stored_elements() {
        let stored = Stored::Canonical(LandingDraft {
            tags: vec![TagDraft {
                id: Some("tag-1".into()),
                label: None,
            }],
            facts: vec![FactDraft {
                id: Some("f1".into()),
                image: Some("/x.jpg".into()),
                ..FactDraft::default()
            }],
            features: vec![FeatureDraft {
                id: Some("feature-1".into()),
                image: Some("/img/own.jpg".into()),
                ..FeatureDraft::default()
            }],
            ..LandingDraft::default()
        });

        let config = Catalog::default().normalize(
            Some(&stored),
            &fixture::complex(),
            &listings(),
        );

        assert_eq!(config.tags.len(), 1);
        assert_eq!(config.tags[0].id, "tag-1");
        assert_eq!(config.tags[0].label, "Метка");
        assert_eq!(config.facts.len(), 1);
        assert_eq!(config.facts[0].id, "f1");
        assert_eq!(config.facts[0].title, "Детали");
        assert_eq!(config.facts[0].value, "По запросу");
        assert_eq!(config.facts[0].image.as_deref(), Some("/x.jpg"));
        assert_eq!(config.features.len(), 1);
        assert_eq!(config.features[0].id, "feature-1");
        assert_eq!(config.features[0].title, "Особенность");
        assert_eq!(config.features[0].image.as_deref(), Some("/img/own.jpg"));
        assert_eq!(config.features[0].preset, None);
        assert_eq!(renormalize(&config), config);
    }

    #[test]
    fn is_idempotent() {
        let catalog = Catalog::default();
        let complex = fixture::complex();
        let canonical = Stored::Canonical(LandingDraft {
            tags: vec![TagDraft {
                id: None,
                label: Some("Бизнес".into()),
            }],
            features: vec![FeatureDraft {
                preset: Some("unknown".into()),
                image: Some("/static/landing/features/view.jpg".into()),
                ..FeatureDraft::default()
            }],
            ..LandingDraft::default()
        });

        for stored in [None, Some(legacy()), Some(canonical)] {
            let once = catalog.normalize(stored.as_ref(), &complex, &listings());

            assert_eq!(renormalize(&once), once, "stored: {stored:?}");
        }
    }

    #[test]
    fn is_idempotent_over_nested_escapes() {
        let stored = Stored::Canonical(LandingDraft {
            cta_label: Some(r"\u005cu0041".into()),
            tags: vec![TagDraft {
                id: None,
                label: Some(r"\u005cu005cu0416К".into()),
            }],
            ..LandingDraft::default()
        });

        let once = Catalog::default().normalize(
            Some(&stored),
            &fixture::complex(),
            &listings(),
        );

        assert_eq!(once.cta_label.as_deref(), Some("A"));
        assert_eq!(once.tags[0].label, "ЖК");
        assert_eq!(renormalize(&once), once);
    }

    #[test]
    fn recomputes_floor_plans() {
        let catalog = Catalog::default();
        let complex = fixture::complex();
        let stored: Stored = serde_json::from_str(
            r#"{
                "plans": {
                    "title": "Квартиры",
                    "items": [{"id": "plan-0", "price": "от 1 ₽"}]
                }
            }"#,
        )
        .unwrap();
        let mut listings = listings();
        listings[0].price = Some(4_500_000_u32.into());

        let config = catalog.normalize(Some(&stored), &complex, &listings);

        assert_eq!(config.plans.title, "Квартиры");
        assert_eq!(config.plans.items[0].price, "от 4 500 000 ₽");
        assert_eq!(
            renormalize(&config).plans.items[0].price,
            "от 5 000 000 ₽",
        );
    }

    #[test]
    fn holds_caps() {
        let catalog = Catalog::default();
        let stored = Stored::Canonical(LandingDraft {
            facts: (0..30)
                .map(|n| FactDraft {
                    title: Some(format!("Факт {n}")),
                    ..FactDraft::default()
                })
                .collect(),
            features: (0..30)
                .map(|n| FeatureDraft {
                    title: Some(format!("Особенность {n}")),
                    ..FeatureDraft::default()
                })
                .collect(),
            ..LandingDraft::default()
        });
        let legacy = Stored::Legacy(LegacyContent {
            blocks: vec![
                LegacyBlock::Overview {
                    bullets: (0..30).map(|n| format!("Пункт {n}")).collect(),
                },
                LegacyBlock::Gallery {
                    images: (0..30).map(|n| format!("/img/{n}.jpg")).collect(),
                },
            ],
        });

        for stored in [stored, legacy] {
            let config =
                catalog.normalize(Some(&stored), &fixture::complex(), &[]);

            assert!(config.facts.len() <= MAX_FACTS);
            assert!(config.features.len() <= MAX_FEATURES);
        }
    }
}
