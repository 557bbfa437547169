use poem_openapi::payload::Json;
use poem_openapi::{ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::providers::DirectoryListing;
use crate::types::db::faculty_staff;

/// Admin form for a new directory entry
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateDirectoryEntryRequest {
    pub faculty_name: Option<String>,
    pub staff_name: Option<String>,
}

/// A stored directory entry
#[derive(Object, Debug)]
pub struct DirectoryEntryResponse {
    pub id: i32,
    pub college_name: String,
    pub branch_name: String,
    pub faculty_name: String,
    pub staff_name: String,
    pub created_at: i64,
}

impl From<faculty_staff::Model> for DirectoryEntryResponse {
    fn from(entry: faculty_staff::Model) -> Self {
        Self {
            id: entry.id,
            college_name: entry.college_name,
            branch_name: entry.branch_name,
            faculty_name: entry.faculty_name,
            staff_name: entry.staff_name,
            created_at: entry.created_at,
        }
    }
}

/// Faculty and staff names for the caller's college/branch
#[derive(Object, Debug)]
pub struct DirectoryLookupResponse {
    pub college_name: String,
    pub branch_name: String,
    pub faculty_name: String,
    pub staff_name: String,

    /// False when placeholder names were returned
    pub found: bool,
}

impl From<DirectoryListing> for DirectoryLookupResponse {
    fn from(listing: DirectoryListing) -> Self {
        Self {
            college_name: listing.scope.college_name,
            branch_name: listing.scope.branch_name,
            faculty_name: listing.faculty_name,
            staff_name: listing.staff_name,
            found: listing.found,
        }
    }
}

/// API response for the admin directory form
#[derive(ApiResponse)]
pub enum CreateDirectoryEntryApiResponse {
    /// Entry stored for the admin's college/branch
    #[oai(status = 201)]
    Created(Json<DirectoryEntryResponse>),
}
