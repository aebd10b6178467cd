// ==========================================
// 酒店收益管理系统 - 竞品映射 API
// ==========================================
// 职责: 竞品酒店登记、本店房型 ↔ 竞品房型映射维护
// ==========================================

use std::sync::{Arc, RwLock};

use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::mapping::{CompetitorHotel, HotelMappingBook, RoomMapping};

pub struct MappingApi {
    book: Arc<RwLock<HotelMappingBook>>,
    /// 本店房型 id（校验映射目标）
    room_type_ids: Vec<String>,
}

impl MappingApi {
    pub fn new(book: Arc<RwLock<HotelMappingBook>>, room_type_ids: Vec<String>) -> Self {
        Self {
            book,
            room_type_ids,
        }
    }

    fn read(&self) -> ApiResult<std::sync::RwLockReadGuard<'_, HotelMappingBook>> {
        self.book
            .read()
            .map_err(|e| ApiError::Internal(format!("锁获取失败: {}", e)))
    }

    fn write(&self) -> ApiResult<std::sync::RwLockWriteGuard<'_, HotelMappingBook>> {
        self.book
            .write()
            .map_err(|e| ApiError::Internal(format!("锁获取失败: {}", e)))
    }

    pub fn list_hotels(&self) -> ApiResult<Vec<CompetitorHotel>> {
        Ok(self.read()?.hotels().to_vec())
    }

    /// 登记竞品酒店
    ///
    /// # 错误
    /// - 名称为空: InvalidInput
    /// - 已登记: InvalidInput
    pub fn add_hotel(&self, name: &str) -> ApiResult<CompetitorHotel> {
        let hotel = CompetitorHotel::from_name(name)
            .ok_or_else(|| ApiError::InvalidInput("竞品酒店名称不能为空".to_string()))?;
        if !self.write()?.add_hotel(hotel.clone()) {
            return Err(ApiError::InvalidInput(format!("竞品酒店已存在: {}", hotel.id)));
        }
        info!(competitor_id = %hotel.id, "竞品酒店已登记");
        Ok(hotel)
    }

    pub fn mappings_for(&self, competitor_id: &str) -> ApiResult<Vec<RoomMapping>> {
        let book = self.read()?;
        if !book.has_hotel(competitor_id) {
            return Err(ApiError::NotFound(format!("竞品酒店(id={})不存在", competitor_id)));
        }
        Ok(book.mappings_for(competitor_id).to_vec())
    }

    /// 新增映射，返回该竞品最新映射
    pub fn add_mapping(
        &self,
        competitor_id: &str,
        your_room_type: &str,
        competitor_room_type: &str,
    ) -> ApiResult<Vec<RoomMapping>> {
        if !self.room_type_ids.iter().any(|id| id == your_room_type) {
            return Err(ApiError::NotFound(format!("房型(id={})不存在", your_room_type)));
        }
        if competitor_room_type.trim().is_empty() {
            return Err(ApiError::InvalidInput("竞品房型不能为空".to_string()));
        }
        {
            let mut book = self.write()?;
            if !book.has_hotel(competitor_id) {
                return Err(ApiError::NotFound(format!("竞品酒店(id={})不存在", competitor_id)));
            }
            book.add_mapping(competitor_id, your_room_type, competitor_room_type);
        }
        self.mappings_for(competitor_id)
    }

    /// 删除映射，返回该竞品最新映射
    pub fn remove_mapping(
        &self,
        competitor_id: &str,
        your_room_type: &str,
        competitor_room_type: &str,
    ) -> ApiResult<Vec<RoomMapping>> {
        {
            let mut book = self.write()?;
            if !book.remove_mapping(competitor_id, your_room_type, competitor_room_type) {
                return Err(ApiError::NotFound(format!(
                    "映射不存在: {} / {} → {}",
                    competitor_id, your_room_type, competitor_room_type
                )));
            }
        }
        self.mappings_for(competitor_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> MappingApi {
        MappingApi::new(
            Arc::new(RwLock::new(HotelMappingBook::new())),
            vec!["standard".to_string(), "deluxe".to_string()],
        )
    }

    #[test]
    fn test_add_hotel_and_mapping() {
        let api = api();
        let hotel = api.add_hotel("Harbor View Inn").unwrap();
        assert_eq!(hotel.id, "harbor-view-inn");

        let mappings = api.add_mapping(&hotel.id, "standard", "Classic Queen").unwrap();
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].competitor_room_types, vec!["Classic Queen"]);

        let mappings = api.remove_mapping(&hotel.id, "standard", "Classic Queen").unwrap();
        assert!(mappings.is_empty());
    }

    #[test]
    fn test_rejections() {
        let api = api();
        assert!(matches!(api.add_hotel("   "), Err(ApiError::InvalidInput(_))));
        api.add_hotel("Harbor View Inn").unwrap();
        assert!(matches!(api.add_hotel("harbor view inn"), Err(ApiError::InvalidInput(_))));
        assert!(matches!(
            api.add_mapping("harbor-view-inn", "penthouse", "Loft"),
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            api.add_mapping("unknown", "standard", "Loft"),
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            api.remove_mapping("harbor-view-inn", "standard", "Loft"),
            Err(ApiError::NotFound(_))
        ));
    }
}
