use crate::domain::model::{LookupDto, Make, Model};

/// 具有 id 與名稱的參考資料
pub trait LookupEntity {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
}

impl LookupEntity for Make {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl LookupEntity for Model {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

pub fn to_lookup_dto<E: LookupEntity>(entity: &E) -> LookupDto {
    LookupDto {
        id: entity.id(),
        name: entity.name().to_string(),
    }
}
