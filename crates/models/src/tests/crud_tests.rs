use super::setup_test_db;
use crate::errors::ModelError;
use crate::{booking, provider, user};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, Set};
use uuid::Uuid;

fn new_user(tag: &str, role: user::UserRole) -> user::NewUser {
    user::NewUser {
        external_identity_id: format!("ext-{tag}"),
        email: format!("{tag}@example.com"),
        name: None,
        phone: None,
        role,
        photo_url: None,
    }
}

fn provider_am(user_id: Uuid, rating: i64) -> provider::ActiveModel {
    let now = Utc::now().into();
    provider::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        business_name: Set("Fade Factory".into()),
        provider_type: Set(provider::ProviderType::Barber),
        address: Set("1 Main St".into()),
        city: Set("Lisbon".into()),
        latitude: Set(None),
        longitude: Set(None),
        services: Set(vec!["haircut".to_string()].into()),
        specialties: Set(provider::StringList::default()),
        rating: Set(Decimal::new(rating, 1)),
        total_reviews: Set(0),
        status: Set(provider::ProviderStatus::Pending),
        verified: Set(false),
        opening_time: Set(Some("09:00".into())),
        closing_time: Set(Some("18:00".into())),
        has_home_service: Set(false),
        delivery_fee: Set(Decimal::ZERO),
        commission: Set(provider::default_commission()),
        total_bookings: Set(0),
        total_revenue: Set(Decimal::ZERO),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

#[tokio::test]
async fn user_create_applies_defaults() -> Result<()> {
    let db = setup_test_db().await?;

    let u = user::create(&db, new_user("ana", user::UserRole::Customer)).await?;
    assert_eq!(u.name, "ana");
    assert_eq!(u.role, user::UserRole::Customer);
    assert_eq!(u.status, user::UserStatus::Active);
    assert_eq!(u.total_bookings, 0);
    assert_eq!(u.total_spent, Decimal::ZERO);

    let found = user::find_by_external_id(&db, "ext-ana").await?;
    assert_eq!(found.map(|f| f.id), Some(u.id));
    assert!(user::find_by_external_id(&db, "ext-missing").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() -> Result<()> {
    let db = setup_test_db().await?;

    user::create(&db, new_user("dup", user::UserRole::Customer)).await?;
    let mut again = new_user("dup", user::UserRole::Customer);
    again.external_identity_id = "ext-other".into();
    let err = user::create(&db, again).await.unwrap_err();
    assert!(matches!(err, ModelError::Conflict(_)), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn provider_requires_existing_owner() -> Result<()> {
    let db = setup_test_db().await?;

    let err = provider_am(Uuid::new_v4(), 40).insert(&db).await.map_err(ModelError::from).unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn provider_and_booking_round_trip_through_relations() -> Result<()> {
    let db = setup_test_db().await?;

    let owner = user::create(&db, new_user("owner", user::UserRole::Provider)).await?;
    let customer = user::create(&db, new_user("cust", user::UserRole::Customer)).await?;
    let p = provider_am(owner.id, 45).insert(&db).await?;
    assert_eq!(p.services.0, vec!["haircut".to_string()]);
    assert_eq!(p.commission, Decimal::new(15, 0));

    let now = Utc::now().into();
    let b = booking::ActiveModel {
        id: Set(Uuid::new_v4()),
        booking_number: Set(booking::generate_booking_number()),
        user_id: Set(customer.id),
        provider_id: Set(p.id),
        service: Set("haircut".into()),
        date: Set(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()),
        time: Set("10:30".into()),
        status: Set(booking::BookingStatus::Pending),
        amount: Set(Decimal::new(10000, 2)),
        commission: Set(Decimal::ZERO),
        payment_status: Set(booking::PaymentStatus::Pending),
        payment_method: Set(None),
        notes: Set(None),
        ai_style_used: Set(false),
        ai_style_image: Set(None),
        cancelled_by: Set(None),
        cancel_reason: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&db)
    .await?;

    let owned = owner.find_related(provider::Entity).all(&db).await?;
    assert_eq!(owned.len(), 1);
    let for_provider = p.find_related(booking::Entity).all(&db).await?;
    assert_eq!(for_provider.len(), 1);
    assert_eq!(for_provider[0].id, b.id);
    assert_eq!(for_provider[0].amount, Decimal::new(100, 0));

    let reloaded = booking::Entity::find_by_id(b.id).one(&db).await?.unwrap();
    assert_eq!(reloaded.booking_number, b.booking_number);
    assert_eq!(reloaded.status, booking::BookingStatus::Pending);
    Ok(())
}
