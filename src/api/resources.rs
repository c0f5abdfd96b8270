use super::client::ApiClient;
use super::models::{
    City, Dianchuanshi, District, Fotang, Institution, ListQuery, Locality, Page, Province,
    Qiudao, User,
};
use crate::error::AppResult;
use serde_json::Value;
use std::path::Path;
use tracing::info;

impl ApiClient {
    // Umat

    pub async fn list_users(&self, query: &ListQuery) -> AppResult<Page<User>> {
        self.get_json("/profile/user", &query.to_query_pairs()).await
    }

    pub async fn get_user(&self, id: i64) -> AppResult<User> {
        self.get_json(&format!("/profile/user/{}", id), &[]).await
    }

    pub async fn create_user(&self, user: &User) -> AppResult<User> {
        self.post_json("/profile/user", user).await
    }

    pub async fn update_user(&self, id: i64, user: &User) -> AppResult<User> {
        self.put_json(&format!("/profile/user/{}", id), user).await
    }

    pub async fn delete_user(&self, id: i64) -> AppResult<()> {
        self.delete(&format!("/profile/user/{}", id)).await
    }

    /// Bulk import umat from an `.xlsx` sheet
    pub async fn import_users(&self, file: &Path) -> AppResult<Value> {
        info!("Importing umat from {}", file.display());
        self.upload_xlsx("/profile/user/import", file).await
    }

    // Qiudao

    pub async fn list_qiudao(&self, query: &ListQuery) -> AppResult<Page<Qiudao>> {
        self.get_json("/profile/qiudao", &query.to_query_pairs()).await
    }

    pub async fn get_qiudao(&self, id: i64) -> AppResult<Qiudao> {
        self.get_json(&format!("/profile/qiudao/{}", id), &[]).await
    }

    pub async fn create_qiudao(&self, qiudao: &Qiudao) -> AppResult<Qiudao> {
        self.post_json("/profile/qiudao", qiudao).await
    }

    pub async fn update_qiudao(&self, id: i64, qiudao: &Qiudao) -> AppResult<Qiudao> {
        self.put_json(&format!("/profile/qiudao/{}", id), qiudao).await
    }

    pub async fn delete_qiudao(&self, id: i64) -> AppResult<()> {
        self.delete(&format!("/profile/qiudao/{}", id)).await
    }

    /// Bulk import qiudao records from an `.xlsx` sheet
    pub async fn import_qiudao(&self, file: &Path) -> AppResult<Value> {
        info!("Importing qiudao from {}", file.display());
        self.upload_xlsx("/profile/qiudao/import", file).await
    }

    // Reference data

    pub async fn list_dianchuanshi(&self) -> AppResult<Vec<Dianchuanshi>> {
        self.get_json("/dianchuanshi", &[]).await
    }

    pub async fn list_institutions(&self) -> AppResult<Vec<Institution>> {
        self.get_json("/institution", &[]).await
    }

    pub async fn list_fotang(&self) -> AppResult<Vec<Fotang>> {
        self.get_json("/fotang", &[]).await
    }

    // Locations

    pub async fn list_provinces(&self) -> AppResult<Vec<Province>> {
        self.get_json("/profile/location/provinces", &[]).await
    }

    pub async fn list_cities(&self, province_id: i64) -> AppResult<Vec<City>> {
        self.get_json(
            "/profile/location/cities",
            &[("provinceId", province_id.to_string())],
        )
        .await
    }

    pub async fn list_districts(&self, city_id: i64) -> AppResult<Vec<District>> {
        self.get_json(
            "/profile/location/districts",
            &[("cityId", city_id.to_string())],
        )
        .await
    }

    pub async fn list_localities(&self, district_id: i64) -> AppResult<Vec<Locality>> {
        self.get_json(
            "/profile/location/localities",
            &[("districtId", district_id.to_string())],
        )
        .await
    }
}
