use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::debug;

use clinic_cell::{
    format_slot, Appointment, AppointmentStatus, BookAppointmentRequest, Clinic, ClinicError,
    CreatePatientRequest,
};

const RULE: &str = "==================================================";
const THIN_RULE: &str = "----------------------------------------";

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Clinic(#[from] ClinicError),

    #[error("end of input")]
    EndOfInput,
}

type ShellResult<T = ()> = Result<T, ShellError>;

/// Text menu driving a [`Clinic`]. Reads choices from `input` and writes
/// everything shown to the user to `output`.
pub struct Shell<'a, R, W> {
    clinic: &'a mut Clinic,
    clinic_name: String,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(clinic: &'a mut Clinic, clinic_name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            clinic,
            clinic_name: clinic_name.into(),
            input,
            output,
        }
    }

    /// Runs the menu until the user exits or input ends. Only terminal I/O
    /// failures are returned; clinic errors are reported and the menu goes on.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let choice = match self.prompt("Select an option") {
                Ok(choice) => choice,
                Err(ShellError::EndOfInput) => break,
                Err(ShellError::Io(e)) => return Err(e),
                Err(ShellError::Clinic(e)) => {
                    self.report(&e)?;
                    continue;
                }
            };
            debug!("Menu choice: {:?}", choice);

            if choice == "10" {
                writeln!(self.output, "\nThank you for using the {} appointment system!", self.clinic_name)?;
                break;
            }

            match self.dispatch(&choice) {
                Ok(()) => {}
                Err(ShellError::Clinic(e)) => self.report(&e)?,
                Err(ShellError::EndOfInput) => break,
                Err(ShellError::Io(e)) => return Err(e),
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, choice: &str) -> ShellResult {
        match choice {
            "1" => self.register_patient(),
            "2" => self.list_patients(),
            "3" => self.book_appointment(),
            "4" => self.list_appointments(None),
            "5" => self.list_appointments(Some(AppointmentStatus::Pending)),
            "6" => self.change_state(),
            "7" => self.appointments_by_patient(),
            "8" => self.appointments_by_doctor(),
            "9" => self.statistics(),
            _ => {
                writeln!(self.output, "Invalid option. Please try again.")?;
                Ok(())
            }
        }
    }

    // ========== INPUT / OUTPUT ==========

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n{}", RULE)?;
        writeln!(self.output, " APPOINTMENT MANAGEMENT SYSTEM - CLINIC '{}' ", self.clinic_name)?;
        writeln!(self.output, "{}", RULE)?;
        writeln!(self.output, "1. Register new patient")?;
        writeln!(self.output, "2. List patients")?;
        writeln!(self.output, "3. Book new appointment")?;
        writeln!(self.output, "4. List all appointments")?;
        writeln!(self.output, "5. List pending appointments")?;
        writeln!(self.output, "6. Change appointment state")?;
        writeln!(self.output, "7. Appointments by patient")?;
        writeln!(self.output, "8. Appointments by doctor")?;
        writeln!(self.output, "9. System statistics")?;
        writeln!(self.output, "10. Exit")?;
        writeln!(self.output, "{}", THIN_RULE)
    }

    fn header(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.output, "\n{}\n{}\n{}", RULE, title, RULE)
    }

    fn prompt(&mut self, label: &str) -> ShellResult<String> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShellError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    fn prompt_number<T: std::str::FromStr>(&mut self, label: &str, what: &str) -> ShellResult<T> {
        let raw = self.prompt(label)?;
        raw.parse().map_err(|_| {
            ShellError::Clinic(ClinicError::InvalidInput(format!("{} must be a valid number, got '{}'", what, raw)))
        })
    }

    fn report(&mut self, err: &ClinicError) -> io::Result<()> {
        err.report();
        writeln!(self.output, "Error: {}", err)
    }

    fn appointment_line(&self, appointment: &Appointment) -> String {
        format!(
            "Appointment {}: {} with {} ({}) - State: {}",
            appointment.id,
            self.clinic.patient_name(&appointment.patient_id),
            self.clinic.doctor_name(&appointment.doctor_id),
            format_slot(&appointment.scheduled_at),
            appointment.status
        )
    }

    // ========== PATIENTS ==========

    fn register_patient(&mut self) -> ShellResult {
        self.header("NEW PATIENT REGISTRATION")?;

        let national_id = self.prompt("National ID")?;
        if self.clinic.find_patient(&national_id).is_some() {
            return Err(ClinicError::DuplicateIdentity(format!(
                "a patient with national ID {} already exists",
                national_id
            ))
            .into());
        }

        let first_name = self.prompt("First name")?;
        let last_name = self.prompt("Last name")?;
        let age: u32 = self.prompt_number("Age", "Age")?;
        let phone = self.prompt("Phone")?;
        let email = self.prompt("Email")?;

        let patient = self.clinic.register_patient(CreatePatientRequest::new(
            national_id, first_name, last_name, age, phone, email,
        ))?;
        let name = patient.full_name();
        writeln!(self.output, "\nPatient registered successfully: {}", name)?;
        Ok(())
    }

    fn list_patients(&mut self) -> ShellResult {
        self.header("PATIENT LIST")?;

        if self.clinic.list_patients().is_empty() {
            writeln!(self.output, "No patients registered.")?;
            return Ok(());
        }
        for (i, patient) in self.clinic.list_patients().iter().enumerate() {
            writeln!(self.output, "{}. {} - National ID: {}", i + 1, patient.full_name(), patient.national_id)?;
        }
        Ok(())
    }

    // ========== APPOINTMENTS ==========

    fn book_appointment(&mut self) -> ShellResult {
        self.header("BOOK NEW APPOINTMENT")?;

        if self.clinic.list_patients().is_empty() {
            return Err(ClinicError::NotFound("no patients registered".to_string()).into());
        }
        if self.clinic.list_doctors().is_empty() {
            return Err(ClinicError::NotFound("no doctors available".to_string()).into());
        }

        let national_id = self.prompt("Patient national ID")?;
        let patient_name = match self.clinic.find_patient(&national_id) {
            Some(patient) => patient.full_name(),
            None => return Err(ClinicError::NotFound(format!("patient {}", national_id)).into()),
        };

        writeln!(self.output, "\nAvailable doctors:")?;
        for (i, doctor) in self.clinic.list_doctors().iter().enumerate() {
            writeln!(self.output, "{}. {} - {}", i + 1, doctor.full_name(), doctor.specialty)?;
        }

        let position: usize = self.prompt_number("\nSelect the doctor (number)", "Doctor selection")?;
        let doctor = self.clinic.doctor_at(position)?;
        let (doctor_id, doctor_name, slots) = (doctor.id.clone(), doctor.full_name(), doctor.available_slots.clone());

        writeln!(self.output, "\nAvailable slots for {}:", doctor_name)?;
        if slots.is_empty() {
            writeln!(self.output, "No slots available for this doctor.")?;
            return Ok(());
        }
        for (i, slot) in slots.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, format_slot(slot))?;
        }

        let slot_position: usize = self.prompt_number("\nSelect the slot (number)", "Slot selection")?;
        let slot = slot_position
            .checked_sub(1)
            .and_then(|index| slots.get(index))
            .copied()
            .ok_or_else(|| ClinicError::InvalidInput(format!("no slot at position {}", slot_position)))?;

        let reason = self.prompt("Reason for the visit")?;

        let appointment = self
            .clinic
            .book_appointment(BookAppointmentRequest::new(national_id, doctor_id, slot, reason))?;
        let appointment_id = appointment.id.clone();

        writeln!(self.output, "\nAppointment booked successfully")?;
        writeln!(self.output, "Appointment ID: {}", appointment_id)?;
        writeln!(self.output, "Patient: {}", patient_name)?;
        writeln!(self.output, "Doctor: {}", doctor_name)?;
        writeln!(self.output, "Date: {}", format_slot(&slot))?;
        Ok(())
    }

    fn list_appointments(&mut self, status_filter: Option<AppointmentStatus>) -> ShellResult {
        let title = match status_filter {
            Some(status) => format!("APPOINTMENTS - STATE: {}", status),
            None => "ALL APPOINTMENTS".to_string(),
        };
        self.header(&title)?;

        let lines: Vec<String> = self
            .clinic
            .list_appointments(status_filter)
            .into_iter()
            .map(|appointment| self.appointment_line(appointment))
            .collect();

        if lines.is_empty() {
            writeln!(self.output, "No appointments registered.")?;
            return Ok(());
        }
        for (i, line) in lines.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, line)?;
        }
        Ok(())
    }

    fn change_state(&mut self) -> ShellResult {
        self.header("CHANGE APPOINTMENT STATE")?;

        let appointment_id = self.prompt("Appointment ID")?;
        let card = match self.clinic.find_appointment(&appointment_id) {
            Some(appointment) => self.clinic.describe_appointment(appointment),
            None => return Err(ClinicError::NotFound(format!("appointment {}", appointment_id)).into()),
        };
        writeln!(self.output, "\nCurrent appointment:\n{}", card)?;

        let states: Vec<&str> = AppointmentStatus::ALL.iter().map(|s| s.as_str()).collect();
        writeln!(self.output, "\nAvailable states: {}", states.join(", "))?;

        let new_state = self.prompt("New state")?.to_uppercase();
        let status = self.clinic.transition_appointment(&appointment_id, &new_state)?.status;
        writeln!(self.output, "\nState changed to: {}", status)?;

        if status == AppointmentStatus::Attended {
            let observations = self.prompt("Enter the consultation observations")?;
            self.clinic.set_observations(&appointment_id, &observations)?;
        }
        Ok(())
    }

    // ========== QUERIES AND REPORTS ==========

    fn appointment_details(&self, appointment: &Appointment, counterpart: &str) -> String {
        format!(
            "  ID: {}\n  {}\n  Date: {}\n  State: {}\n  Reason: {}",
            appointment.id,
            counterpart,
            format_slot(&appointment.scheduled_at),
            appointment.status,
            appointment.reason
        )
    }

    fn appointments_by_patient(&mut self) -> ShellResult {
        self.header("APPOINTMENTS BY PATIENT")?;

        let national_id = self.prompt("Patient national ID")?;
        let blocks: Vec<String> = self
            .clinic
            .appointments_by_patient(&national_id)?
            .into_iter()
            .map(|a| {
                let doctor = format!("Doctor: {}", self.clinic.doctor_name(&a.doctor_id));
                self.appointment_details(a, &doctor)
            })
            .collect();

        let name = self.clinic.patient_name(&national_id);
        writeln!(self.output, "\nAppointments of patient: {}\n{}", name, THIN_RULE)?;
        if blocks.is_empty() {
            writeln!(self.output, "The patient has no appointments.")?;
            return Ok(());
        }
        for (i, block) in blocks.iter().enumerate() {
            writeln!(self.output, "\nAppointment {}:\n{}", i + 1, block)?;
        }
        Ok(())
    }

    fn appointments_by_doctor(&mut self) -> ShellResult {
        self.header("APPOINTMENTS BY DOCTOR")?;

        let names: Vec<String> = self.clinic.list_doctors().iter().map(|d| d.full_name()).collect();
        for (i, name) in names.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, name)?;
        }

        let position: usize = self.prompt_number("\nSelect the doctor (number)", "Doctor selection")?;
        let doctor = self.clinic.doctor_at(position)?;
        let (doctor_id, doctor_name) = (doctor.id.clone(), doctor.full_name());

        let blocks: Vec<String> = self
            .clinic
            .appointments_by_doctor(&doctor_id)?
            .into_iter()
            .map(|a| {
                let patient = format!("Patient: {}", self.clinic.patient_name(&a.patient_id));
                self.appointment_details(a, &patient)
            })
            .collect();

        writeln!(self.output, "\nAppointments of {}\n{}", doctor_name, THIN_RULE)?;
        if blocks.is_empty() {
            writeln!(self.output, "The doctor has no appointments assigned.")?;
            return Ok(());
        }
        for (i, block) in blocks.iter().enumerate() {
            writeln!(self.output, "\nAppointment {}:\n{}", i + 1, block)?;
        }
        Ok(())
    }

    fn statistics(&mut self) -> ShellResult {
        self.header("SYSTEM STATISTICS")?;

        let stats = self.clinic.compute_statistics();
        writeln!(self.output, "\nOVERVIEW:")?;
        writeln!(self.output, "  - Registered patients: {}", stats.total_patients)?;
        writeln!(self.output, "  - Registered doctors: {}", stats.total_doctors)?;
        writeln!(self.output, "  - Total appointments: {}", stats.total_appointments)?;

        if stats.total_appointments == 0 {
            return Ok(());
        }

        writeln!(self.output, "\nAPPOINTMENTS BY STATE:")?;
        for entry in &stats.status_breakdown {
            writeln!(self.output, "  - {}: {} ({:.1}%)", entry.status, entry.count, entry.percentage)?;
        }

        writeln!(self.output, "\nAPPOINTMENTS BY DOCTOR:")?;
        for entry in &stats.doctor_breakdown {
            writeln!(self.output, "  - {}: {} appointments", entry.doctor_name, entry.count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared_config::AppConfig;
    use std::io::Cursor;

    fn demo_clinic() -> Clinic {
        let base = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        Clinic::from_config(&AppConfig::default(), base).unwrap()
    }

    fn run_script(clinic: &mut Clinic, script: &str) -> String {
        let mut output = Vec::new();
        Shell::new(clinic, "Salud Integral", Cursor::new(script.to_string()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_exit_option() {
        let mut clinic = demo_clinic();
        let output = run_script(&mut clinic, "10\n");
        assert!(output.contains("CLINIC 'Salud Integral'"));
        assert!(output.contains("Thank you for using the Salud Integral appointment system!"));
    }

    #[test]
    fn test_end_of_input_exits_cleanly() {
        let mut clinic = demo_clinic();
        // Input ends in the middle of a registration.
        let output = run_script(&mut clinic, "1\n1799999999\nRosa\n");
        assert!(output.contains("NEW PATIENT REGISTRATION"));
        assert_eq!(clinic.list_patients().len(), 3);
    }

    #[test]
    fn test_register_and_list_patient() {
        let mut clinic = demo_clinic();
        let output = run_script(
            &mut clinic,
            "1\n1799999999\nRosa\nMora\n51\n0995556677\nrosa@email.com\n2\n10\n",
        );
        assert!(output.contains("Patient registered successfully: Rosa Mora"));
        assert!(output.contains("4. Rosa Mora - National ID: 1799999999"));
        assert_eq!(clinic.find_patient("1799999999").unwrap().age, 51);
    }

    #[test]
    fn test_non_numeric_age_is_reported_and_menu_continues() {
        let mut clinic = demo_clinic();
        let output = run_script(
            &mut clinic,
            "1\n1799999999\nRosa\nMora\nfifty\n2\n10\n",
        );
        assert!(output.contains("Error: Invalid input: Age must be a valid number, got 'fifty'"));
        assert!(output.contains("PATIENT LIST"));
        assert!(clinic.find_patient("1799999999").is_none());
    }

    #[test]
    fn test_duplicate_patient_is_rejected_before_details() {
        let mut clinic = demo_clinic();
        let output = run_script(&mut clinic, "1\n1723456789\n10\n");
        assert!(output.contains("Error: Duplicate identity"));
        assert_eq!(clinic.list_patients().len(), 3);
    }

    #[test]
    fn test_book_then_attend_with_observations() {
        let mut clinic = demo_clinic();
        let output = run_script(
            &mut clinic,
            "3\n1723456789\n1\n1\nChest pain\n6\nT0001\nattended\nAll good\n10\n",
        );

        assert!(output.contains("Appointment booked successfully"));
        assert!(output.contains("Appointment ID: T0001"));
        assert!(output.contains("Date: 02/03/2026 09:00"));
        assert!(output.contains("State changed to: ATTENDED"));

        let appointment = clinic.find_appointment("T0001").unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Attended);
        assert_eq!(appointment.observations, "All good");
        assert_eq!(clinic.find_doctor("D001").unwrap().available_slots.len(), 19);
    }

    #[test]
    fn test_invalid_state_keeps_current_state() {
        let mut clinic = demo_clinic();
        let output = run_script(&mut clinic, "3\n1724567890\n2\n3\nFever\n6\nT0001\nbogus\n10\n");

        assert!(output.contains("Error: Invalid state"));
        assert_eq!(clinic.find_appointment("T0001").unwrap().status, AppointmentStatus::Pending);
        assert_eq!(
            clinic.find_appointment("T0001").unwrap().scheduled_at,
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap().and_hms_opt(13, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_out_of_range_selection() {
        let mut clinic = demo_clinic();
        let output = run_script(&mut clinic, "3\n1723456789\n7\n3\n1723456789\n1\n99\n10\n");

        assert!(output.contains("Error: Invalid input: no doctor at position 7"));
        assert!(output.contains("Error: Invalid input: no slot at position 99"));
        assert!(clinic.list_appointments(None).is_empty());
    }

    #[test]
    fn test_unknown_patient_and_invalid_option() {
        let mut clinic = demo_clinic();
        let output = run_script(&mut clinic, "3\n0000000000\n42\n7\n0000000000\n10\n");

        assert!(output.contains("Error: Not Found: patient 0000000000"));
        assert!(output.contains("Invalid option. Please try again."));
        assert!(output.contains("Error: Not Found: Patient 0000000000 not found"));
    }

    #[test]
    fn test_listings_and_statistics() {
        let mut clinic = demo_clinic();
        let output = run_script(
            &mut clinic,
            "5\n9\n3\n1725678901\n3\n1\nRash\n4\n5\n7\n1725678901\n8\n3\n9\n10\n",
        );

        assert!(output.contains("No appointments registered."));
        assert!(output.contains("  - Total appointments: 0"));
        assert!(output.contains("1. Appointment T0001: Carmen Vega with Dr. Luis Rodríguez (02/03/2026 09:00) - State: PENDING"));
        assert!(output.contains("APPOINTMENTS - STATE: PENDING"));
        assert!(output.contains("Appointments of patient: Carmen Vega"));
        assert!(output.contains("  Doctor: Dr. Luis Rodríguez"));
        assert!(output.contains("Appointments of Dr. Luis Rodríguez"));
        assert!(output.contains("  Patient: Carmen Vega"));
        assert!(output.contains("  - PENDING: 1 (100.0%)"));
        assert!(output.contains("  - Dr. Carlos Mendoza: 0 appointments"));
        assert!(output.contains("  - Dr. Luis Rodríguez: 1 appointments"));
    }
}
