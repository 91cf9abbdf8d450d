//! Use case tests against in-memory fakes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use auth::models::UserId;
use chrono::Utc;

use crate::application::materials::{
    ListMaterialsUseCase, UploadMaterialInput, UploadMaterialUseCase,
};
use crate::application::requests::CourseRequestUseCase;
use crate::domain::entity::{
    Branch, CourseRequest, CourseRequestDetail, NewStudyMaterial, StudentSummary, StudyMaterial,
};
use crate::domain::repository::{
    BranchRepository, CourseRequestRepository, StudyMaterialRepository,
};
use crate::domain::value_object::{Classification, RequestStatus};
use crate::error::{AcademyError, AcademyResult};
use crate::infra::material_store::FsMaterialStore;

#[derive(Clone, Default)]
struct MemAcademy {
    branches: Arc<Mutex<Vec<Branch>>>,
    requests: Arc<Mutex<Vec<CourseRequest>>>,
    materials: Arc<Mutex<Vec<StudyMaterial>>>,
    students: Arc<Mutex<HashMap<UserId, String>>>,
}

impl MemAcademy {
    fn with_branch(name: &str) -> (Self, i32) {
        let store = Self::default();
        store.branches.lock().unwrap().push(Branch {
            id: 1,
            name: name.to_string(),
        });
        (store, 1)
    }

    fn add_student(&self, username: &str) -> UserId {
        let id = UserId::new();
        self.students
            .lock()
            .unwrap()
            .insert(id, username.to_string());
        id
    }

    fn add_request(&self, student: &UserId, branch_id: i32, status: RequestStatus) -> i32 {
        let mut requests = self.requests.lock().unwrap();
        let id = requests.len() as i32 + 1;
        requests.push(CourseRequest {
            id,
            student_id: *student,
            branch_id,
            status,
            created_at: Utc::now(),
        });
        id
    }

    fn add_material(&self, branch_id: i32, title: &str, is_preview: bool) {
        let mut materials = self.materials.lock().unwrap();
        let id = materials.len() as i32 + 1;
        materials.push(StudyMaterial {
            id,
            title: title.to_string(),
            file_path: format!("{title}.pdf"),
            classification: Classification::Notes,
            branch_id,
            is_preview,
        });
    }

    fn detail(&self, request: &CourseRequest) -> CourseRequestDetail {
        let username = self
            .students
            .lock()
            .unwrap()
            .get(&request.student_id)
            .cloned()
            .unwrap_or_default();
        let branch = self
            .branches
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == request.branch_id)
            .cloned()
            .unwrap();
        CourseRequestDetail {
            id: request.id,
            status: request.status,
            student: StudentSummary {
                id: request.student_id,
                username: username.clone(),
                email: format!("{username}@example.com"),
                student_id: None,
            },
            branch,
        }
    }
}

impl BranchRepository for MemAcademy {
    async fn list(&self) -> AcademyResult<Vec<Branch>> {
        Ok(self.branches.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> AcademyResult<Option<Branch>> {
        Ok(self
            .branches
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }
}

impl CourseRequestRepository for MemAcademy {
    async fn find_by_id(&self, id: i32) -> AcademyResult<Option<CourseRequest>> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_first_by_student(
        &self,
        student_id: &UserId,
    ) -> AcademyResult<Option<CourseRequest>> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.student_id == *student_id)
            .cloned())
    }

    async fn list_by_student(
        &self,
        student_id: &UserId,
    ) -> AcademyResult<Vec<CourseRequestDetail>> {
        let requests: Vec<_> = self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.student_id == *student_id)
            .cloned()
            .collect();
        Ok(requests.iter().map(|r| self.detail(r)).collect())
    }

    async fn list_pending(&self) -> AcademyResult<Vec<CourseRequestDetail>> {
        let requests: Vec<_> = self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.status == RequestStatus::Pending)
            .cloned()
            .collect();
        Ok(requests.iter().map(|r| self.detail(r)).collect())
    }

    async fn update_status(&self, request: &CourseRequest) -> AcademyResult<()> {
        let mut requests = self.requests.lock().unwrap();
        if let Some(stored) = requests.iter_mut().find(|r| r.id == request.id) {
            stored.status = request.status;
        }
        Ok(())
    }

    async fn find_detail_by_id(&self, id: i32) -> AcademyResult<Option<CourseRequestDetail>> {
        let request = self
            .requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned();
        Ok(request.map(|r| self.detail(&r)))
    }
}

impl StudyMaterialRepository for MemAcademy {
    async fn create(&self, material: NewStudyMaterial) -> AcademyResult<StudyMaterial> {
        let mut materials = self.materials.lock().unwrap();
        let id = materials.len() as i32 + 1;
        let material = StudyMaterial {
            id,
            title: material.title,
            file_path: material.file_path,
            classification: material.classification,
            branch_id: material.branch_id,
            is_preview: material.is_preview,
        };
        materials.push(material.clone());
        Ok(material)
    }

    async fn find_by_id(&self, id: i32) -> AcademyResult<Option<StudyMaterial>> {
        Ok(self
            .materials
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn list_by_branch(
        &self,
        branch_id: i32,
        preview_only: bool,
    ) -> AcademyResult<Vec<StudyMaterial>> {
        Ok(self
            .materials
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.branch_id == branch_id && (!preview_only || m.is_preview))
            .cloned()
            .collect())
    }
}

fn titles(materials: &[StudyMaterial]) -> Vec<&str> {
    materials.iter().map(|m| m.title.as_str()).collect()
}

#[tokio::test]
async fn approved_request_opens_the_whole_branch() {
    let (store, branch) = MemAcademy::with_branch("Mechanical");
    let store = Arc::new(store);
    store.add_material(branch, "full", false);
    store.add_material(branch, "preview", true);

    let student = store.add_student("taro");
    store.add_request(&student, branch, RequestStatus::Approved);

    let use_case = ListMaterialsUseCase::new(store.clone(), store.clone());
    let materials = use_case.execute(&student).await.unwrap();
    assert_eq!(titles(&materials), vec!["full", "preview"]);
}

#[tokio::test]
async fn unapproved_request_sees_previews_only() {
    let (store, branch) = MemAcademy::with_branch("Mechanical");
    let store = Arc::new(store);
    store.add_material(branch, "full", false);
    store.add_material(branch, "preview", true);

    let use_case = ListMaterialsUseCase::new(store.clone(), store.clone());

    for status in [RequestStatus::Pending, RequestStatus::Rejected] {
        let student = store.add_student("taro");
        store.add_request(&student, branch, status);
        let materials = use_case.execute(&student).await.unwrap();
        assert_eq!(titles(&materials), vec!["preview"], "status {status}");
    }
}

#[tokio::test]
async fn no_request_sees_nothing() {
    let (store, branch) = MemAcademy::with_branch("Mechanical");
    let store = Arc::new(store);
    store.add_material(branch, "preview", true);

    let student = store.add_student("taro");
    let use_case = ListMaterialsUseCase::new(store.clone(), store.clone());
    assert!(use_case.execute(&student).await.unwrap().is_empty());
}

#[tokio::test]
async fn review_applies_verdicts_and_refuses_the_rest() {
    let (store, branch) = MemAcademy::with_branch("Mechanical");
    let store = Arc::new(store);
    let student = store.add_student("taro");
    let id = store.add_request(&student, branch, RequestStatus::Pending);

    let use_case = CourseRequestUseCase::new(store.clone());

    assert!(matches!(
        use_case.review(id, "Pending").await,
        Err(AcademyError::InvalidStatus)
    ));
    assert!(matches!(
        use_case.review(id, "approved").await,
        Err(AcademyError::InvalidStatus)
    ));
    assert!(matches!(
        use_case.review(999, "Approved").await,
        Err(AcademyError::RequestNotFound)
    ));

    let detail = use_case.review(id, "Approved").await.unwrap();
    assert_eq!(detail.status, RequestStatus::Approved);
    assert_eq!(detail.branch.name, "Mechanical");
    assert_eq!(detail.student.username, "taro");

    // Settled requests drop off the pending dashboard
    assert!(use_case.pending().await.unwrap().is_empty());
}

#[tokio::test]
async fn pending_dashboard_lists_only_pending() {
    let (store, branch) = MemAcademy::with_branch("Mechanical");
    let store = Arc::new(store);

    let a = store.add_student("a");
    let b = store.add_student("b");
    store.add_request(&a, branch, RequestStatus::Pending);
    store.add_request(&b, branch, RequestStatus::Approved);

    let use_case = CourseRequestUseCase::new(store.clone());
    let pending = use_case.pending().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].student.username, "a");
}

#[tokio::test]
async fn upload_validates_and_stores_the_file() {
    let (store, branch) = MemAcademy::with_branch("Mechanical");
    let store = Arc::new(store);
    let dir = tempfile::tempdir().unwrap();
    let files = Arc::new(FsMaterialStore::new(dir.path()));

    let use_case = UploadMaterialUseCase::new(store.clone(), store.clone(), files.clone());

    let input = |branch_id: i32, classification: &str, bytes: &[u8]| UploadMaterialInput {
        title: "Thermodynamics notes".into(),
        classification: classification.into(),
        branch_id,
        is_preview: false,
        file_name: "thermo.pdf".into(),
        file_bytes: bytes.to_vec(),
    };

    assert!(matches!(
        use_case.execute(input(99, "Notes", b"pdf")).await,
        Err(AcademyError::BranchNotFound)
    ));
    assert!(matches!(
        use_case.execute(input(branch, "Homework", b"pdf")).await,
        Err(AcademyError::Validation(_))
    ));
    assert!(matches!(
        use_case.execute(input(branch, "Notes", b"")).await,
        Err(AcademyError::Validation(_))
    ));

    let material = use_case
        .execute(input(branch, "Notes", b"%PDF-1.4"))
        .await
        .unwrap();
    assert_eq!(material.branch_id, branch);
    assert!(!material.is_preview);

    // The stored file is readable back through the store
    let bytes = files.read(&material.file_path).await.unwrap();
    assert_eq!(bytes, b"%PDF-1.4");
}
