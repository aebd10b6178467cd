// ==========================================
// 酒店收益管理系统 - 房型与客群目录
// ==========================================
// 职责: 静态目录数据（4 房型 × 4 客群）
// ==========================================

use serde::{Deserialize, Serialize};

/// 房型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomType {
    pub id: String,
    pub name: String,
    /// 基准价（美元）
    pub base_price: f64,
    /// 可住人数
    pub capacity: u32,
    /// 房量
    pub inventory: u32,
}

impl RoomType {
    fn new(id: &str, name: &str, base_price: f64, capacity: u32, inventory: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            base_price,
            capacity,
            inventory,
        }
    }
}

/// 客群
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSegment {
    pub id: String,
    pub name: String,
    /// 价格系数
    pub price_multiplier: f64,
    pub description: String,
}

impl CustomerSegment {
    fn new(id: &str, name: &str, price_multiplier: f64, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price_multiplier,
            description: description.to_string(),
        }
    }
}

/// 默认房型目录
pub fn default_room_types() -> Vec<RoomType> {
    vec![
        RoomType::new("standard", "Standard Room", 100.0, 2, 50),
        RoomType::new("deluxe", "Deluxe Room", 150.0, 2, 30),
        RoomType::new("suite", "Suite", 250.0, 4, 15),
        RoomType::new("executive", "Executive Suite", 350.0, 4, 5),
    ]
}

/// 默认客群目录
pub fn default_customer_segments() -> Vec<CustomerSegment> {
    vec![
        CustomerSegment::new("default", "Standard Rate", 1.0, "Regular booking rate"),
        CustomerSegment::new("member", "Loyalty Member", 0.9, "Hotel loyalty program members"),
        CustomerSegment::new(
            "corporate",
            "Corporate",
            0.85,
            "Business travelers with negotiated rates",
        ),
        CustomerSegment::new(
            "package",
            "Package Deal",
            0.95,
            "Booking as part of a travel package",
        ),
    ]
}

/// 房量合计
pub fn total_inventory(rooms: &[RoomType]) -> u32 {
    rooms.iter().map(|r| r.inventory).sum()
}
