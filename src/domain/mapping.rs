// ==========================================
// 酒店收益管理系统 - 竞品房型映射
// ==========================================
// 职责: 竞品酒店登记,本店房型 ↔ 竞品房型映射维护
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 竞品酒店
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorHotel {
    pub id: String,
    pub name: String,
}

impl CompetitorHotel {
    /// 由名称生成竞品酒店
    ///
    /// id 规则: 小写 + 空白折叠为 '-'
    /// 名称为空（去空白后）返回 None
    pub fn from_name(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return None;
        }
        let id = trimmed
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        Some(Self {
            id,
            name: trimmed.to_string(),
        })
    }
}

/// 单个本店房型的映射
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomMapping {
    pub your_room_type: String,
    pub competitor_room_types: Vec<String>,
}

// ==========================================
// HotelMappingBook - 映射簿
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotelMappingBook {
    hotels: Vec<CompetitorHotel>,
    /// competitor_id -> 映射列表
    mappings: BTreeMap<String, Vec<RoomMapping>>,
}

impl HotelMappingBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hotels(&self) -> &[CompetitorHotel] {
        &self.hotels
    }

    pub fn has_hotel(&self, competitor_id: &str) -> bool {
        self.hotels.iter().any(|h| h.id == competitor_id)
    }

    /// 登记竞品酒店
    ///
    /// 同 id 已存在时不重复登记，返回 false
    pub fn add_hotel(&mut self, hotel: CompetitorHotel) -> bool {
        if self.has_hotel(&hotel.id) {
            return false;
        }
        self.hotels.push(hotel);
        true
    }

    /// 某竞品的全部映射
    pub fn mappings_for(&self, competitor_id: &str) -> &[RoomMapping] {
        self.mappings
            .get(competitor_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// 某竞品下本店房型对应的竞品房型
    pub fn competitor_room_types(&self, competitor_id: &str, your_room_type: &str) -> Vec<String> {
        self.mappings_for(competitor_id)
            .iter()
            .find(|m| m.your_room_type == your_room_type)
            .map(|m| m.competitor_room_types.clone())
            .unwrap_or_default()
    }

    /// 新增映射
    ///
    /// 空房型名忽略；同名重复添加不生效
    /// 返回是否实际新增
    pub fn add_mapping(
        &mut self,
        competitor_id: &str,
        your_room_type: &str,
        competitor_room_type: &str,
    ) -> bool {
        let room = competitor_room_type.trim();
        if room.is_empty() {
            return false;
        }

        let list = self.mappings.entry(competitor_id.to_string()).or_default();
        match list.iter_mut().find(|m| m.your_room_type == your_room_type) {
            Some(existing) => {
                if existing.competitor_room_types.iter().any(|r| r == room) {
                    return false;
                }
                existing.competitor_room_types.push(room.to_string());
            }
            None => list.push(RoomMapping {
                your_room_type: your_room_type.to_string(),
                competitor_room_types: vec![room.to_string()],
            }),
        }
        true
    }

    /// 删除映射
    ///
    /// 删除后为空的映射条目一并移除
    pub fn remove_mapping(
        &mut self,
        competitor_id: &str,
        your_room_type: &str,
        competitor_room_type: &str,
    ) -> bool {
        let Some(list) = self.mappings.get_mut(competitor_id) else {
            return false;
        };

        let mut removed = false;
        for mapping in list.iter_mut().filter(|m| m.your_room_type == your_room_type) {
            let before = mapping.competitor_room_types.len();
            mapping
                .competitor_room_types
                .retain(|r| r != competitor_room_type);
            removed |= mapping.competitor_room_types.len() != before;
        }
        list.retain(|m| !m.competitor_room_types.is_empty());
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotel_id_from_name() {
        let hotel = CompetitorHotel::from_name("  Grand  Plaza Hotel ").unwrap();
        assert_eq!(hotel.id, "grand-plaza-hotel");
        assert_eq!(hotel.name, "Grand  Plaza Hotel");
        assert!(CompetitorHotel::from_name("   ").is_none());
    }

    #[test]
    fn test_add_and_remove_mapping() {
        let mut book = HotelMappingBook::new();
        let hotel = CompetitorHotel::from_name("Harbor Inn").unwrap();
        assert!(book.add_hotel(hotel.clone()));
        assert!(!book.add_hotel(hotel));

        assert!(book.add_mapping("harbor-inn", "standard", "Classic Queen"));
        assert!(book.add_mapping("harbor-inn", "standard", "Classic King"));
        assert!(!book.add_mapping("harbor-inn", "standard", "Classic King"));
        assert!(!book.add_mapping("harbor-inn", "standard", "  "));
        assert_eq!(
            book.competitor_room_types("harbor-inn", "standard"),
            vec!["Classic Queen".to_string(), "Classic King".to_string()]
        );

        assert!(book.remove_mapping("harbor-inn", "standard", "Classic Queen"));
        assert!(book.remove_mapping("harbor-inn", "standard", "Classic King"));
        // 空映射被清理
        assert!(book.mappings_for("harbor-inn").is_empty());
        assert!(!book.remove_mapping("harbor-inn", "standard", "Classic King"));
    }
}
