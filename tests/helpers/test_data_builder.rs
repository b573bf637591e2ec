// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

#![allow(dead_code)]

use chrono::NaiveDate;
use engorda_pro::api::{AddAnimalRequest, NewTransactionRequest};

// ==========================================
// AddAnimalRequest 构建器
// ==========================================

pub struct AnimalBuilder {
    lot_id: String,
    tag_number: String,
    initial_weight: f64,
    age_months: u32,
    breed: String,
    entry_date: Option<NaiveDate>,
}

impl AnimalBuilder {
    pub fn new(lot_id: &str) -> Self {
        Self {
            lot_id: lot_id.to_string(),
            tag_number: "BR-0001".to_string(),
            initial_weight: 350.0,
            age_months: 18,
            breed: "Nelore".to_string(),
            entry_date: None,
        }
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag_number = tag.to_string();
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.initial_weight = weight;
        self
    }

    pub fn age_months(mut self, months: u32) -> Self {
        self.age_months = months;
        self
    }

    pub fn breed(mut self, breed: &str) -> Self {
        self.breed = breed.to_string();
        self
    }

    pub fn entry_date(mut self, date: NaiveDate) -> Self {
        self.entry_date = Some(date);
        self
    }

    pub fn build(self) -> AddAnimalRequest {
        AddAnimalRequest {
            lot_id: self.lot_id,
            tag_number: self.tag_number,
            initial_weight: self.initial_weight,
            age_months: self.age_months,
            breed: self.breed,
            entry_date: self.entry_date,
        }
    }
}

// ==========================================
// NewTransactionRequest 构建器
// ==========================================

pub struct TransactionBuilder {
    user_id: String,
    farm_id: String,
    lot_id: Option<String>,
    kind: String,
    amount: f64,
    description: String,
    category: String,
}

impl TransactionBuilder {
    pub fn income(user_id: &str, farm_id: &str, amount: f64) -> Self {
        Self::new(user_id, farm_id, "income", amount)
    }

    pub fn expense(user_id: &str, farm_id: &str, amount: f64) -> Self {
        Self::new(user_id, farm_id, "expense", amount)
    }

    fn new(user_id: &str, farm_id: &str, kind: &str, amount: f64) -> Self {
        Self {
            user_id: user_id.to_string(),
            farm_id: farm_id.to_string(),
            lot_id: None,
            kind: kind.to_string(),
            amount,
            description: "Lançamento de teste".to_string(),
            category: "Outros".to_string(),
        }
    }

    pub fn lot(mut self, lot_id: &str) -> Self {
        self.lot_id = Some(lot_id.to_string());
        self
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn build(self) -> NewTransactionRequest {
        NewTransactionRequest {
            user_id: self.user_id,
            farm_id: self.farm_id,
            lot_id: self.lot_id,
            kind: self.kind,
            amount: self.amount,
            description: self.description,
            category: self.category,
        }
    }
}
