//! [`Database`] implementations.

use std::{collections::HashSet, sync::Arc};

use common::operations::{
    By, Commit, Delete, Insert, Lock, Select, Transact, Update,
};
use itertools::Itertools as _;
use tracerr::Traced;

use crate::{
    domain::{
        applicant, application, evaluation, user, vacancy, Applicant,
        Application, Department, Evaluation, StatusEvent, User, Vacancy,
    },
    infra::{
        database::{self, constraint},
        Database,
    },
    read,
};

use super::{Access, Error, Memory, NonTx, State, Table, Tx};

impl Database<Transact> for Memory<NonTx> {
    type Ok = Memory<Tx>;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(Memory(Tx::begin(Arc::clone(&self.shared)).await))
    }
}

impl Database<Transact> for Memory<Tx> {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(self.clone())
    }
}

impl Database<Commit> for Memory<Tx> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        self.commit().await;
        Ok(())
    }
}

impl State {
    /// Checks that the [`Department`] referenced by a [`Vacancy`] exists.
    fn check_vacancy_refs(&self, vacancy: &Vacancy) -> Result<(), Error> {
        if self.departments.iter().any(|d| d.id == vacancy.department_id) {
            Ok(())
        } else {
            Err(Error::ForeignKeyViolation(constraint::VACANCY_DEPARTMENT_FK))
        }
    }

    /// Deletes the matching [`Application`]s along with their
    /// [`StatusEvent`]s and [`Evaluation`]s.
    fn delete_applications(&mut self, which: impl Fn(&Application) -> bool) {
        let ids = self
            .applications
            .iter()
            .filter(|a| which(a))
            .map(|a| a.id)
            .collect::<HashSet<_>>();
        self.applications.retain(|a| !ids.contains(&a.id));
        self.status_history.retain(|e| !ids.contains(&e.application_id));
        self.evaluations.retain(|e| !ids.contains(&e.application_id));
    }

    /// Checks that the referenced [`Applicant`] and [`Vacancy`] exist.
    fn check_application_refs(&self, app: &Application) -> Result<(), Error> {
        if !self.applicants.iter().any(|a| a.id == app.applicant_id) {
            return Err(Error::ForeignKeyViolation(
                constraint::APPLICATION_APPLICANT_FK,
            ));
        }
        if !self.vacancies.iter().any(|v| v.id == app.vacancy_id) {
            return Err(Error::ForeignKeyViolation(
                constraint::APPLICATION_VACANCY_FK,
            ));
        }
        Ok(())
    }

    /// Checks that an [`Application`] with the provided ID exists.
    fn check_application_exists(
        &self,
        id: application::Id,
        constraint: &'static str,
    ) -> Result<(), Error> {
        if self.applications.iter().any(|a| a.id == id) {
            Ok(())
        } else {
            Err(Error::ForeignKeyViolation(constraint))
        }
    }
}

impl<T: Access> Database<Insert<User>> for Memory<T> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(user): Insert<User>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(Table::Users, |s| {
            s.users.push(user);
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<T: Access> Database<Select<By<Option<User>, user::Id>>> for Memory<T> {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|s| s.users.iter().find(|u| u.id == id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<'e, T: Access> Database<Select<By<Option<User>, &'e user::Email>>>
    for Memory<T>
{
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, &'e user::Email>>,
    ) -> Result<Self::Ok, Self::Err> {
        let email = by.into_inner();
        self.read(|s| s.users.iter().find(|u| &u.email == email).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<T: Access> Database<Insert<Department>> for Memory<T> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(department): Insert<Department>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(Table::Departments, |s| {
            s.departments.push(department);
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<T: Access> Database<Select<By<Vec<Department>, ()>>> for Memory<T> {
    type Ok = Vec<Department>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Department>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut departments = self
            .read(|s| s.departments.clone())
            .await
            .map_err(tracerr::wrap!())?;
        departments.sort_by(|a, b| {
            AsRef::<str>::as_ref(&a.name).cmp(AsRef::<str>::as_ref(&b.name))
        });
        Ok(departments)
    }
}

impl<T: Access> Database<Insert<Vacancy>> for Memory<T> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(vacancy): Insert<Vacancy>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(Table::Vacancies, |s| {
            s.check_vacancy_refs(&vacancy)?;
            s.vacancies.push(vacancy);
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<T: Access> Database<Update<Vacancy>> for Memory<T> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(vacancy): Update<Vacancy>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(Table::Vacancies, |s| {
            s.check_vacancy_refs(&vacancy)?;
            if let Some(existing) =
                s.vacancies.iter_mut().find(|v| v.id == vacancy.id)
            {
                *existing = vacancy;
            }
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<T: Access> Database<Lock<By<Vacancy, vacancy::Id>>> for Memory<T> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Vacancy, vacancy::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(())
    }
}

impl<T: Access> Database<Delete<By<Vacancy, vacancy::Id>>> for Memory<T> {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Vacancy, vacancy::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.write(Table::Vacancies, |s| {
            let before = s.vacancies.len();
            s.vacancies.retain(|v| v.id != id);
            if s.vacancies.len() == before {
                return Ok(false);
            }
            s.delete_applications(|a| a.vacancy_id == id);
            Ok(true)
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<T: Access> Database<Select<By<Option<Vacancy>, vacancy::Id>>>
    for Memory<T>
{
    type Ok = Option<Vacancy>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Vacancy>, vacancy::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|s| s.vacancies.iter().find(|v| v.id == id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<T: Access> Database<Select<By<Vec<Vacancy>, ()>>> for Memory<T> {
    type Ok = Vec<Vacancy>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Vacancy>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut vacancies = self
            .read(|s| s.vacancies.clone())
            .await
            .map_err(tracerr::wrap!())?;
        vacancies.sort_by(|a, b| b.posting_date.cmp(&a.posting_date));
        Ok(vacancies)
    }
}

impl<T: Access> Database<Insert<Applicant>> for Memory<T> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(applicant): Insert<Applicant>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(Table::Applicants, |s| {
            s.applicants.push(applicant);
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<T: Access> Database<Update<Applicant>> for Memory<T> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(applicant): Update<Applicant>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(Table::Applicants, |s| {
            if let Some(existing) =
                s.applicants.iter_mut().find(|a| a.id == applicant.id)
            {
                *existing = applicant;
            }
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<T: Access> Database<Lock<By<Applicant, applicant::Id>>> for Memory<T> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Applicant, applicant::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(())
    }
}

impl<T: Access> Database<Delete<By<Applicant, applicant::Id>>>
    for Memory<T>
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Applicant, applicant::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.write(Table::Applicants, |s| {
            let before = s.applicants.len();
            s.applicants.retain(|a| a.id != id);
            if s.applicants.len() == before {
                return Ok(false);
            }
            s.delete_applications(|a| a.applicant_id == id);
            Ok(true)
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<T: Access> Database<Select<By<Option<Applicant>, applicant::Id>>>
    for Memory<T>
{
    type Ok = Option<Applicant>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Applicant>, applicant::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|s| s.applicants.iter().find(|a| a.id == id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<T: Access> Database<Select<By<Vec<Applicant>, ()>>> for Memory<T> {
    type Ok = Vec<Applicant>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Applicant>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut applicants = self
            .read(|s| s.applicants.clone())
            .await
            .map_err(tracerr::wrap!())?;
        applicants.sort_by(|a, b| {
            AsRef::<str>::as_ref(&a.full_name)
                .cmp(AsRef::<str>::as_ref(&b.full_name))
        });
        Ok(applicants)
    }
}

impl<T: Access> Database<Insert<Application>> for Memory<T> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(application): Insert<Application>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(Table::Applications, |s| {
            s.check_application_refs(&application)?;
            s.applications.push(application);
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<T: Access> Database<Update<Application>> for Memory<T> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(application): Update<Application>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(Table::Applications, |s| {
            s.check_application_refs(&application)?;
            if let Some(existing) =
                s.applications.iter_mut().find(|a| a.id == application.id)
            {
                *existing = application;
            }
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<T: Access> Database<Lock<By<Application, application::Id>>>
    for Memory<T>
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Application, application::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(())
    }
}

impl<T: Access> Database<Select<By<Option<Application>, application::Id>>>
    for Memory<T>
{
    type Ok = Option<Application>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Application>, application::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|s| s.applications.iter().find(|a| a.id == id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<T: Access> Database<Select<By<Vec<Application>, ()>>> for Memory<T> {
    type Ok = Vec<Application>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Application>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut applications = self
            .read(|s| s.applications.clone())
            .await
            .map_err(tracerr::wrap!())?;
        applications.sort_by(|a, b| b.date_applied.cmp(&a.date_applied));
        Ok(applications)
    }
}

impl<T: Access> Database<Delete<By<Application, application::Id>>>
    for Memory<T>
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Application, application::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.write(Table::Applications, |s| {
            if !s.applications.iter().any(|a| a.id == id) {
                return Ok(false);
            }
            s.delete_applications(|a| a.id == id);
            Ok(true)
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<T: Access> Database<Insert<StatusEvent>> for Memory<T> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(event): Insert<StatusEvent>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(Table::StatusHistory, |s| {
            s.check_application_exists(
                event.application_id,
                constraint::STATUS_HISTORY_APPLICATION_FK,
            )?;
            s.status_history.push(event);
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<T: Access> Database<Select<By<Vec<StatusEvent>, application::Id>>>
    for Memory<T>
{
    type Ok = Vec<StatusEvent>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<StatusEvent>, application::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let mut history = self
            .read(|s| {
                s.status_history
                    .iter()
                    .filter(|e| e.application_id == id)
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .await
            .map_err(tracerr::wrap!())?;
        // Stable, so same-day events keep their insertion order.
        history.sort_by(|a, b| a.updated_at.cmp(&b.updated_at));
        Ok(history)
    }
}

impl<T: Access> Database<Insert<Evaluation>> for Memory<T> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(evaluation): Insert<Evaluation>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(Table::Evaluations, |s| {
            s.check_application_exists(
                evaluation.application_id,
                constraint::EVALUATION_APPLICATION_FK,
            )?;
            if s
                .evaluations
                .iter()
                .any(|e| e.application_id == evaluation.application_id)
            {
                return Err(Error::UniqueViolation(
                    constraint::EVALUATION_APPLICATION_UNIQUE,
                ));
            }
            s.evaluations.push(evaluation);
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<T: Access> Database<Update<Evaluation>> for Memory<T> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(evaluation): Update<Evaluation>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(Table::Evaluations, |s| {
            if let Some(existing) =
                s.evaluations.iter_mut().find(|e| e.id == evaluation.id)
            {
                *existing = evaluation;
            }
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<T: Access> Database<Lock<By<Evaluation, evaluation::Id>>> for Memory<T> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Evaluation, evaluation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(())
    }
}

impl<T: Access> Database<Select<By<Option<Evaluation>, evaluation::Id>>>
    for Memory<T>
{
    type Ok = Option<Evaluation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Evaluation>, evaluation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|s| s.evaluations.iter().find(|e| e.id == id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<T: Access> Database<Select<By<Vec<Evaluation>, ()>>> for Memory<T> {
    type Ok = Vec<Evaluation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Evaluation>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.read(|s| s.evaluations.clone())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<T: Access> Database<Delete<By<Evaluation, evaluation::Id>>>
    for Memory<T>
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Evaluation, evaluation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.write(Table::Evaluations, |s| {
            let before = s.evaluations.len();
            s.evaluations.retain(|e| e.id != id);
            Ok(s.evaluations.len() != before)
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<T: Access>
    Database<Select<By<Vec<read::ranking::Entry>, vacancy::Id>>>
    for Memory<T>
{
    type Ok = Vec<read::ranking::Entry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<read::ranking::Entry>, vacancy::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let vacancy_id = by.into_inner();
        self.read(|s| {
            s.applications
                .iter()
                .filter(|app| app.vacancy_id == vacancy_id)
                .filter_map(|app| {
                    let eval = s
                        .evaluations
                        .iter()
                        .find(|e| e.application_id == app.id)?;
                    let applicant = s
                        .applicants
                        .iter()
                        .find(|a| a.id == app.applicant_id)?;
                    Some(read::ranking::Entry {
                        application_id: app.id,
                        evaluation_id: eval.id,
                        applicant_name: applicant.full_name.clone(),
                        exam_score: eval.exam_score,
                        interview_score: eval.interview_score,
                        total_score: eval.total_score,
                        remarks: eval.remarks.clone(),
                        evaluated_at: eval.evaluated_at,
                    })
                })
                .collect()
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<T: Access> Database<Select<By<read::Summary, ()>>> for Memory<T> {
    type Ok = read::Summary;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<read::Summary, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.read(|s| read::Summary {
            total_jobs: s.vacancies.len() as u64,
            total_applicants: s.applicants.len() as u64,
            total_applications: s.applications.len() as u64,
            applications_by_status: s
                .applications
                .iter()
                .counts_by(|a| a.status)
                .into_iter()
                .map(|(status, n)| (status, n as u64))
                .sorted()
                .collect(),
            vacancies_by_status: s
                .vacancies
                .iter()
                .counts_by(|v| v.status)
                .into_iter()
                .map(|(status, n)| (status, n as u64))
                .sorted()
                .collect(),
        })
        .await
        .map_err(tracerr::wrap!())
    }
}
