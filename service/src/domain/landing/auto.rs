//! Automatic derivation of a [`LandingConfig`] from feed records.

use common::text;

use crate::domain::catalog::{Complex, Listing, Record as _};

use super::{
    derive_id, format, Catalog, Fact, FeatureItem, LandingConfig, PlansBlock,
    Tag, MAX_AUTO_FEATURES, MAX_FACTS,
};

impl Catalog {
    /// Derives a [`LandingConfig`] of the provided [`Complex`] and its
    /// [`Listing`]s.
    ///
    /// Deterministic: the same inputs always produce the same
    /// [`LandingConfig`], IDs included.
    #[must_use]
    pub fn build_auto(
        &self,
        complex: &Complex,
        listings: &[Listing],
    ) -> LandingConfig {
        LandingConfig {
            accent_color: self.labels.accent_color.clone(),
            surface_color: self.labels.surface_color.clone(),
            hero_image: complex.images.iter().find_map(|i| text::sanitize(i)),
            cta_label: Some(self.labels.cta.clone()),
            preview_photo_label: Some(self.labels.preview_photo.clone()),
            tags: auto_tags(complex),
            facts: self.auto_facts(complex, listings),
            features: self.auto_features(complex),
            plans: PlansBlock {
                title: self.labels.plans_title.clone(),
                description: self.labels.plans_description.clone(),
                cta_label: self.labels.plans_cta.clone(),
                items: self.floor_plans(complex, listings),
            },
        }
    }

    /// Derives highlight [`Fact`]s of the provided [`Complex`].
    fn auto_facts(&self, complex: &Complex, listings: &[Listing]) -> Vec<Fact> {
        let active = listings.iter().filter(|l| l.is_active());

        let price = complex.positive_price_from().or_else(|| {
            active.clone().filter_map(Listing::positive_price).reduce(f64::min)
        });
        let area = complex.positive_area_from().or_else(|| {
            active.clone().filter_map(Listing::positive_area).reduce(f64::min)
        });
        let floors = active.clone().filter_map(Listing::floors).reduce(f64::max);
        let parking = complex
            .description()
            .is_some_and(|d| self.parking.is_match(&d));

        let mut facts = vec![
            (
                "Класс",
                text::sanitize_opt(complex.class.as_deref())
                    .unwrap_or_else(|| "Премиум".to_owned()),
            ),
            (
                "Цена",
                price.map_or_else(
                    || format::PRICE_ON_REQUEST.to_owned(),
                    format::price_from,
                ),
            ),
            (
                "Площадь",
                area.map_or_else(
                    || format::ON_REQUEST.to_owned(),
                    format::area_from,
                ),
            ),
            (
                "Этажность",
                floors.map_or_else(
                    || format::ON_REQUEST.to_owned(),
                    |f| format!("{f:.0} эт."),
                ),
            ),
            (
                "Квартиры",
                format!("{} / {}", listings.len(), active.count()),
            ),
            (
                "Срок сдачи",
                text::sanitize_opt(complex.handover.as_deref())
                    .unwrap_or_else(|| "Уточняется".to_owned()),
            ),
        ];
        if let Some(km) = complex
            .location()
            .map(|p| p.distance_km(&self.landmark.point))
        {
            facts.push((self.landmark.title.as_str(), format::distance(km)));
        }
        if let Some(metro) = complex.nearest_metro() {
            facts.push(("Метро", metro));
        }
        if parking {
            facts.push(("Подземный паркинг", "Да".to_owned()));
        }
        if let Some(finish) = text::sanitize_opt(complex.finish.as_deref()) {
            facts.push(("Отделка", finish));
        }

        facts
            .into_iter()
            .take(MAX_FACTS)
            .enumerate()
            .map(|(i, (title, value))| Fact {
                id: derive_id("fact", i, title),
                title: title.to_owned(),
                value,
                subtitle: None,
                image: self.fact_image(i),
            })
            .collect()
    }

    /// Derives feature ticker items from the description of the provided
    /// [`Complex`].
    fn auto_features(&self, complex: &Complex) -> Vec<FeatureItem> {
        let description = complex.description().unwrap_or_default();
        let matched = self
            .keywords
            .iter()
            .filter(|k| k.pattern.is_match(&description))
            .map(|k| k.title.as_str());
        let titles = text::dedup_and_cap(
            matched.chain(self.default_features.iter().map(String::as_str)),
            MAX_AUTO_FEATURES,
        );

        titles
            .into_iter()
            .enumerate()
            .map(|(i, title)| {
                let preset = self.preset_by_title(&title);
                FeatureItem {
                    id: derive_id("feature", i, &title),
                    image: preset.map(|p| p.image.clone()),
                    preset: preset.map(|p| p.key.clone()),
                    title,
                }
            })
            .collect()
    }
}

/// Derives [`Tag`]s of the provided [`Complex`].
fn auto_tags(complex: &Complex) -> Vec<Tag> {
    let candidates = [
        text::sanitize_opt(complex.class.as_deref()),
        text::sanitize_opt(complex.district.as_deref()),
        complex.nearest_metro().map(|m| format!("м. {m}")),
    ];

    let max = candidates.len();
    text::dedup_and_cap(candidates.into_iter().flatten(), max)
        .into_iter()
        .enumerate()
        .map(|(i, label)| Tag {
            id: derive_id("tag", i, &label),
            label,
        })
        .collect()
}

#[cfg(test)]
mod spec {
    use common::Numeric;

    use crate::domain::{
        catalog::Status,
        landing::{fixture, Catalog, MAX_AUTO_FEATURES},
    };

    #[test]
    fn derives_tags() {
        let mut complex = fixture::complex();
        complex.class = Some("Бизнес".into());
        complex.district = Some(" бизнес ".into());
        complex.metro = vec![" ".into(), "Тверская".into()];

        let config = Catalog::default().build_auto(&complex, &[]);

        let labels = config.tags.iter().map(|t| t.label.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, ["Бизнес", "м. Тверская"]);
    }

    #[test]
    fn derives_facts_in_fixed_order() {
        let mut complex = fixture::complex();
        complex.description = Some("Подземный паркинг и парк рядом".into());
        complex.finish = Some("White box".into());
        let mut archived = fixture::listing("l-3", Some(1), Some(1_000_000.0));
        archived.status = Status::Archived;
        let listings = [
            fixture::listing("l-1", Some(1), Some(7_000_000.0)),
            fixture::listing("l-2", Some(2), Some(6_500_000.0)),
            archived,
        ];

        let config = Catalog::default().build_auto(&complex, &listings);

        let facts = config
            .facts
            .iter()
            .map(|f| (f.title.as_str(), f.value.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            facts,
            [
                ("Класс", "Премиум"),
                ("Цена", "от 6 500 000 ₽"),
                ("Площадь", "от 40 м²"),
                ("Этажность", "25 эт."),
                ("Квартиры", "3 / 2"),
                ("Срок сдачи", "Уточняется"),
                ("До Красной площади", "0,0 км"),
                ("Метро", "Охотный ряд"),
                ("Подземный паркинг", "Да"),
                ("Отделка", "White box"),
            ],
        );
        assert_eq!(config.facts[0].image, config.facts[6].image);
        assert!(config.facts.iter().all(|f| f.image.is_some()));
    }

    #[test]
    fn prefers_explicit_complex_price_and_area() {
        let mut complex = fixture::complex();
        complex.price_from = Some("4 200 000".into());
        complex.area_from = Some(Numeric::Number(31.26));
        complex.lat = None;

        let config = Catalog::default().build_auto(
            &complex,
            &[fixture::listing("l-1", Some(1), Some(1_000_000.0))],
        );

        assert_eq!(config.facts[1].value, "от 4 200 000 ₽");
        assert_eq!(config.facts[2].value, "от 31,3 м²");
        assert!(config.facts.iter().all(|f| f.title != "До Красной площади"));
    }

    #[test]
    fn falls_back_to_placeholders_without_listings() {
        let mut complex = fixture::complex();
        complex.metro.clear();

        let config = Catalog::default().build_auto(&complex, &[]);

        let values = config.facts.iter().map(|f| f.value.as_str()).collect::<Vec<_>>();
        assert_eq!(
            values,
            [
                "Премиум",
                "Цена по запросу",
                "По запросу",
                "По запросу",
                "0 / 0",
                "Уточняется",
                "0,0 км",
            ],
        );
    }

    #[test]
    fn derives_features_from_description_and_defaults() {
        let mut complex = fixture::complex();
        complex.description = Some(
            "Консьерж, фитнес-центр и охраняемая территория у парка".into(),
        );

        let config = Catalog::default().build_auto(&complex, &[]);

        let features = config
            .features
            .iter()
            .map(|f| (f.title.as_str(), f.preset.as_deref()))
            .collect::<Vec<_>>();
        assert_eq!(
            features,
            [
                ("Парк рядом", Some("park")),
                ("Охраняемая территория", Some("security")),
                ("Фитнес-центр", Some("fitness")),
                ("Консьерж-сервис", Some("concierge")),
                ("Двор без машин", Some("yard")),
                ("Детские площадки", Some("playground")),
                ("Магазины и кафе", Some("retail")),
            ],
        );
        assert!(config.features.len() <= MAX_AUTO_FEATURES);
    }

    #[test]
    fn is_deterministic() {
        let complex = fixture::complex();
        let listings = [fixture::listing("l-1", Some(0), Some(5_000_000.0))];
        let catalog = Catalog::default();

        assert_eq!(
            catalog.build_auto(&complex, &listings),
            catalog.build_auto(&complex, &listings),
        );
    }

    #[test]
    fn uses_first_complex_image_as_hero() {
        let mut complex = fixture::complex();
        complex.images = vec!["  ".into(), " /img/hero.jpg ".into()];

        let config = Catalog::default().build_auto(&complex, &[]);

        assert_eq!(config.hero_image.as_deref(), Some("/img/hero.jpg"));
    }
}
