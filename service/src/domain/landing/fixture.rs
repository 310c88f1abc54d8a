//! Records shared by the landing tests.

use common::Numeric;

use crate::domain::catalog::{Complex, Listing, Status};

/// Active [`Complex`] located right at the default landmark.
pub(crate) fn complex() -> Complex {
    Complex {
        id: "c-1".into(),
        title: "ЖК Северный".into(),
        district: None,
        metro: vec!["Охотный ряд".into()],
        price_from: None,
        area_from: None,
        class: None,
        handover: None,
        finish: None,
        lat: Some(Numeric::Number(55.753_930)),
        lon: Some("37,620795".into()),
        status: Status::Active,
        description: None,
        images: vec![],
        updated_at: "2024-01-01T00:00:00Z".into(),
    }
}

/// Active [`Listing`] of 40 m² in a 25-floor building, having a photo and a
/// floor-plan image.
pub(crate) fn listing(
    id: &str,
    bedrooms: Option<u32>,
    price: Option<f64>,
) -> Listing {
    Listing {
        id: id.into(),
        complex_id: Some("c-1".into()),
        title: format!("Квартира {id}"),
        category: Some("newbuild".into()),
        district: None,
        metro: vec![],
        price: price.map(Numeric::Number),
        area_total: Some(Numeric::Number(40.0)),
        bedrooms: bedrooms.map(Into::into),
        floor: Some(Numeric::Number(3.0)),
        floors_total: Some(Numeric::Number(25.0)),
        status: Status::Active,
        description: None,
        images: vec![
            format!("/img/{id}/photo.jpg"),
            format!("/img/{id}/plan.png"),
        ],
        updated_at: "2024-01-01T00:00:00Z".into(),
    }
}
