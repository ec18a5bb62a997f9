use serde::{Deserialize, Serialize};

/// 库存台账条目
///
/// 每个部署只跟踪一个物品，`item_name`为唯一键。
/// 不变式：`count >= 0`，且只能在预约协调器持有行锁的事务内被修改。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryItem {
    pub item_name: String,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_item_serde_roundtrip() {
        let item = InventoryItem {
            item_name: "Pfizer-Batch-A".to_string(),
            count: 42,
        };
        let json = serde_json::to_string(&item).unwrap();
        let parsed: InventoryItem = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, item);
    }
}
