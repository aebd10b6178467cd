// ==========================================
// 酒店收益管理系统 - 告警
// ==========================================

use crate::domain::types::{AlertSeverity, AlertType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 告警
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// 形如 "{type}-{date}"，同一快照内唯一
    pub id: String,
    pub title: String,
    pub description: String,
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    /// 告警对应的预测日期
    pub date: NaiveDate,
    pub is_read: bool,
}

// ==========================================
// AlertInbox - 告警收件箱
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertInbox {
    alerts: Vec<Alert>,
}

impl AlertInbox {
    pub fn new(alerts: Vec<Alert>) -> Self {
        Self { alerts }
    }

    pub fn all(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn unread_count(&self) -> usize {
        self.alerts.iter().filter(|a| !a.is_read).count()
    }

    /// 按类型过滤；None 表示全部
    pub fn filter(&self, alert_type: Option<AlertType>) -> Vec<&Alert> {
        self.alerts
            .iter()
            .filter(|a| alert_type.map_or(true, |t| a.alert_type == t))
            .collect()
    }

    /// 标记已读，返回是否找到该告警
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.alerts.iter_mut().find(|a| a.id == id) {
            Some(alert) => {
                alert.is_read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for alert in &mut self.alerts {
            alert.is_read = true;
        }
    }
}
