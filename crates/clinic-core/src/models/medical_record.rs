use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Identified;

wire_enum! {
    /// 病历记录类型
    pub enum RecordType {
        Consultation => "consultation",
        Diagnosis => "diagnosis",
        Test => "test",
        Surgery => "surgery",
        Prescription => "prescription",
        FollowUp => "follow_up",
        Other => "other",
    }
}

/// 处方
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(with = "crate::models::wire_date")]
    pub start_date: NaiveDate,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::models::wire_date::option"
    )]
    pub end_date: Option<NaiveDate>,
}

/// 检验结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub test_name: String,
    #[serde(with = "crate::models::wire_date")]
    pub test_date: NaiveDate,
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

/// 病历附件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "crate::models::wire_date")]
    pub upload_date: NaiveDate,
}

/// 病历记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub id: String,
    pub patient_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<String>,
    #[serde(with = "crate::models::wire_date")]
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescriptions: Option<Vec<Prescription>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_results: Option<Vec<TestResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl MedicalRecord {
    pub fn attachments(&self) -> &[Attachment] {
        self.attachments.as_deref().unwrap_or(&[])
    }
}

impl Identified for MedicalRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMedicalRecord {
    pub patient_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<String>,
    #[serde(with = "crate::models::wire_date")]
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescriptions: Option<Vec<Prescription>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_results: Option<Vec<TestResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMedicalRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::models::wire_date::option"
    )]
    pub date: Option<NaiveDate>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescriptions: Option<Vec<Prescription>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_results: Option<Vec<TestResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// 新增附件请求（不含ID）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAttachment {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "crate::models::wire_date")]
    pub upload_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_with_nested_arrays() {
        let record: MedicalRecord = serde_json::from_value(serde_json::json!({
            "id": "mr-1",
            "patientId": "p-1",
            "date": "2024-03-01",
            "type": "follow_up",
            "title": "Control postoperatorio",
            "description": "Evolución favorable",
            "prescriptions": [{
                "medication": "Paracetamol",
                "dosage": "500mg",
                "frequency": "cada 8 horas",
                "duration": "5 días",
                "startDate": "2024-03-01"
            }],
            "attachments": [{
                "id": "a-1",
                "name": "rx.png",
                "type": "image/png",
                "url": "https://files.example.com/rx.png",
                "uploadDate": "2024-03-01"
            }]
        }))
        .unwrap();

        assert_eq!(record.record_type, RecordType::FollowUp);
        assert_eq!(record.prescriptions.as_ref().map(Vec::len), Some(1));
        assert_eq!(record.attachments()[0].mime_type, "image/png");
        assert!(record.test_results.is_none());
    }
}
