//! Built-in sample scenario.

use serde_json::{json, Value};

/// The built-in sample case: a 35-year-old woman with fatigable ocular and limb weakness.
///
/// Returned as a decoded document so it goes through the same extraction path as uploads.
pub fn sample_case() -> Value {
    json!({
        "OSCE_Examination": {
            "Objective_for_Doctor": "Assess and diagnose the patient presenting with double vision, difficulty climbing stairs, and upper limb weakness.",
            "Patient_Actor": {
                "Demographics": "35-year-old female",
                "History": "1-month history of double vision, difficulty climbing stairs, and weakness when brushing her hair. Symptoms worsen after activity, improve with rest.",
                "Symptoms": {
                    "Primary_Symptom": "Double vision",
                    "Secondary_Symptoms": [
                        "Difficulty climbing stairs",
                        "Weakness in upper limbs",
                        "Improvement of symptoms after rest"
                    ]
                },
                "Past_Medical_History": "No significant past medical history.",
                "Social_History": "Non-smoker, drinks wine occasionally. Works as a graphic designer.",
                "Review_of_Systems": "No chest pain, palpitations, shortness of breath, or infections."
            },
            "Physical_Examination_Findings": {
                "Vital_Signs": {
                    "Temperature": "36.6°C",
                    "Blood_Pressure": "125/80 mmHg",
                    "Heart_Rate": "72 bpm",
                    "Respiratory_Rate": "16 breaths/min"
                },
                "Neurological_Examination": {
                    "Cranial_Nerves": "Ptosis of right upper eyelid, worsens with upward gaze.",
                    "Motor_Strength": "Weakness in upper limbs, no atrophy.",
                    "Reflexes": "Normal",
                    "Sensation": "Normal"
                }
            },
            "Test_Results": {
                "Blood_Tests": {
                    "Acetylcholine_Receptor_Antibodies": "Present (elevated)"
                },
                "Electromyography": {
                    "Findings": "Decreased muscle response with repetitive stimulation"
                },
                "Imaging": {
                    "Chest_CT": {
                        "Findings": "Normal, no thymoma"
                    }
                }
            },
            "Correct_Diagnosis": "Myasthenia gravis"
        }
    })
}
