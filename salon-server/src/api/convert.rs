//! 类型转换模块
//!
//! 将数据库模型 (db::models) 转换为 API 响应模型 (shared::models)

use crate::db::models as db;
use crate::db::repository::record_key;
use crate::utils::time::millis_to_rfc3339;
use shared::models as api;

// ============ Helper ============

pub fn option_thing_to_key(thing: &Option<surrealdb::sql::Thing>) -> String {
    thing.as_ref().map(record_key).unwrap_or_default()
}

// ============ Booking ============

impl From<db::Booking> for api::Booking {
    fn from(b: db::Booking) -> Self {
        Self {
            id: option_thing_to_key(&b.id),
            client_name: b.client_name,
            client_phone: b.client_phone,
            client_email: b.client_email,
            service_id: b.service_id,
            service_name: b.service_name,
            stylist_id: b.stylist_id,
            stylist_name: b.stylist_name,
            date: b.date,
            time: b.time,
            notes: b.notes,
            status: b.status,
            created_at: millis_to_rfc3339(b.created_at),
            updated_at: b.updated_at.map(millis_to_rfc3339),
            version: b.version,
        }
    }
}

// ============ Product ============

impl From<db::Product> for api::Product {
    fn from(p: db::Product) -> Self {
        Self {
            id: option_thing_to_key(&p.id),
            name: p.name,
            price: p.price,
            category: p.category,
            description: p.description,
            image_url: p.image_url,
            public_id: p.public_id,
            stock: p.stock,
            in_stock: p.in_stock,
            created_at: millis_to_rfc3339(p.created_at),
            updated_at: p.updated_at.map(millis_to_rfc3339),
            version: p.version,
        }
    }
}
